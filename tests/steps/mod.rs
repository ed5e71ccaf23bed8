//! Step definitions for Cucumber tests
//!
//! - `routing` - route registration, navigation and dispatch
//! - `controller` - view transitions driven by controllers

pub mod controller;
pub mod routing;
