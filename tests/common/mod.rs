//! Common test utilities and infrastructure
//!
//! Cucumber world shared by the routing and controller features.

pub mod world;

#[allow(unused_imports)]
pub use world::RoutingWorld;
