//! # Events Module
//!
//! The publish/subscribe mixin shared by every entity, and the event types
//! each entity emits.

pub mod emitter;
pub mod model_events;
pub mod names;
pub mod router_events;
pub mod view_events;

pub use emitter::{Event, EventEmitter, Evented, Handler};
pub use model_events::{CollectionEvent, ModelEvent};
pub use router_events::{ControllerEvent, RouterEvent};
pub use view_events::{CompositeViewEvent, ViewEvent};
