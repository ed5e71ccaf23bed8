//! # Services Module
//!
//! External collaborators the entities delegate to.

pub mod http;

pub use http::{HttpFailure, HttpService, HttpSettings, DEFAULT_TIMEOUT};
