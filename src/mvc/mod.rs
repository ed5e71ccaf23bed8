//! # MVC Module
//!
//! The framework proper. Every entity owns an [`events::EventEmitter`] and
//! exposes it through the [`events::Evented`] trait.

pub mod controllers;
pub mod events;
pub mod models;
pub mod router;
pub mod services;
pub mod views;

pub use controllers::{Controller, ControllerConfig};
pub use events::{Event, EventEmitter, Evented, Handler};
pub use models::{Attributes, Collection, CollectionConfig, Model, ModelConfig};
pub use router::{Location, MemoryLocation, RouteMatch, Router};
pub use services::{HttpFailure, HttpService, HttpSettings};
pub use views::{
    CompositeView, CompositeViewConfig, Document, MemoryDocument, View, ViewConfig, Viewable,
};
