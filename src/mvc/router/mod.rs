//! # Router Module
//!
//! Hash-based routing: pattern compilation, the navigation location
//! abstraction and the dispatching router.

pub mod core;
pub mod location;
pub mod pattern;

pub use self::core::{RouteHandler, Router};
pub use location::{hash_of, Location, LocationListener, MemoryLocation};
pub use pattern::{ParamSpec, RouteMatch, RoutePattern, Token};
