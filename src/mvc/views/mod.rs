//! # Views Module
//!
//! Template views, composite views and the document they render into.

pub mod composite_view;
pub mod document;
pub mod template;
pub mod view;

pub use composite_view::{CompositeView, CompositeViewConfig, CompositeViewInit};
pub use document::{Document, DomEvent, DomHandler, MemoryDocument};
pub use view::{RenderFn, View, ViewConfig, ViewInit};

/// Anything a controller can stage, enable and render
///
/// Both [`View`] and [`CompositeView`] implement this, so composites nest.
pub trait Viewable: Send + Sync {
    fn render(&self);

    fn is_enabled(&self) -> bool;

    /// Enable or disable; a call that does not change the state is a no-op
    fn set_enabled(&self, enabled: bool);

    fn register_dom_events(&self);

    fn unregister_dom_events(&self);
}
