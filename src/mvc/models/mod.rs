//! # Models Module
//!
//! Data containers: single records and ordered collections of them.

pub mod collection;
pub mod model;

pub use collection::{Collection, CollectionConfig, CollectionInit};
pub use model::{Attributes, Model, ModelConfig, ModelInit};
