//! # View Events
//!
//! Events emitted by views and composite views around rendering and
//! enablement.

use super::emitter::Event;
use super::names;

/// Events emitted by a [`View`](crate::mvc::views::View)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    RenderBefore,
    RenderAfter,
    Enabled,
    Disabled,
}

impl Event for ViewEvent {
    fn name(&self) -> &'static str {
        match self {
            ViewEvent::RenderBefore => names::RENDER_BEFORE,
            ViewEvent::RenderAfter => names::RENDER_AFTER,
            ViewEvent::Enabled => names::ENABLED,
            ViewEvent::Disabled => names::DISABLED,
        }
    }
}

/// Events emitted by a [`CompositeView`](crate::mvc::views::CompositeView)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositeViewEvent {
    Added { name: String },
    Removed { name: String },
    Swapped { name: String },
    Reset,
    RenderBefore,
    RenderAfter,
    Enabled,
    Disabled,
}

impl Event for CompositeViewEvent {
    fn name(&self) -> &'static str {
        match self {
            CompositeViewEvent::Added { .. } => names::ADDED,
            CompositeViewEvent::Removed { .. } => names::REMOVED,
            CompositeViewEvent::Swapped { .. } => names::SWAPPED,
            CompositeViewEvent::Reset => names::RESET,
            CompositeViewEvent::RenderBefore => names::RENDER_BEFORE,
            CompositeViewEvent::RenderAfter => names::RENDER_AFTER,
            CompositeViewEvent::Enabled => names::ENABLED,
            CompositeViewEvent::Disabled => names::DISABLED,
        }
    }
}
