//! # Routing Events
//!
//! Events emitted by the router on dispatch and by controllers after a view
//! transition.

use super::emitter::Event;
use super::names;
use crate::mvc::router::RouteMatch;

/// Events emitted by a [`Router`](crate::mvc::router::Router)
#[derive(Debug, Clone, PartialEq)]
pub enum RouterEvent {
    /// A route matched; fired after the route's own handler
    Route(RouteMatch),
}

impl Event for RouterEvent {
    fn name(&self) -> &'static str {
        match self {
            RouterEvent::Route(_) => names::ROUTE,
        }
    }
}

/// Events emitted by a [`Controller`](crate::mvc::controllers::Controller)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The staged view became current for the route `pattern`
    Transitioned { pattern: String },
}

impl Event for ControllerEvent {
    fn name(&self) -> &'static str {
        match self {
            ControllerEvent::Transitioned { .. } => names::TRANSITIONED,
        }
    }
}
