//! # Controller
//!
//! Binds route actions to a router and moves views through three slots on
//! every dispatch:
//!
//! ```text
//! action ──set_next_view──▶ next
//! "route" event:  previous ◀── current ◀── next    (next cleared)
//!                 disable previous, enable current
//! ```
//!
//! When the staged view is already current the dispatch only clears `next`,
//! so re-navigating to the same screen does not flicker.

use crate::mvc::events::{names, ControllerEvent, EventEmitter, Evented, Handler, RouterEvent};
use crate::mvc::router::{RouteMatch, Router};
use crate::mvc::views::Viewable;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Route action bound to a controller
pub type ControllerAction = Arc<dyn Fn(&Controller, &RouteMatch) + Send + Sync>;

/// Hook run once at the end of construction
pub type ControllerInit = Arc<dyn Fn(&Controller) + Send + Sync>;

/// Construction-time overrides for a [`Controller`]
#[derive(Clone, Default)]
pub struct ControllerConfig {
    routes: Vec<(String, ControllerAction)>,
    init: Option<ControllerInit>,
}

impl ControllerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route registered on construction, in call order
    pub fn route<F>(mut self, pattern: impl Into<String>, action: F) -> Self
    where
        F: Fn(&Controller, &RouteMatch) + Send + Sync + 'static,
    {
        self.routes.push((pattern.into(), Arc::new(action)));
        self
    }

    pub fn init<F>(mut self, init: F) -> Self
    where
        F: Fn(&Controller) + Send + Sync + 'static,
    {
        self.init = Some(Arc::new(init));
        self
    }
}

#[derive(Default)]
struct Slots {
    previous: Option<Arc<dyn Viewable>>,
    current: Option<Arc<dyn Viewable>>,
    next: Option<Arc<dyn Viewable>>,
}

fn same_view(a: &Option<Arc<dyn Viewable>>, b: &Option<Arc<dyn Viewable>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

pub struct Controller {
    router: Arc<Router>,
    slots: Mutex<Slots>,
    route_handler: Mutex<Option<Handler<RouterEvent>>>,
    events: EventEmitter<ControllerEvent>,
}

impl Controller {
    /// Subscribe to `router`, register the configured routes, then run init
    pub fn new(router: Arc<Router>, config: ControllerConfig) -> Arc<Self> {
        let ControllerConfig { routes, init } = config;
        let controller = Arc::new(Self {
            router,
            slots: Mutex::new(Slots::default()),
            route_handler: Mutex::new(None),
            events: EventEmitter::new(),
        });

        let weak = Arc::downgrade(&controller);
        let handler = controller.router.subscribe(names::ROUTE, move |event| {
            let RouterEvent::Route(route) = event;
            if let Some(controller) = weak.upgrade() {
                controller.on_route(route);
            }
        });
        *controller.lock_handler() = Some(handler);

        for (pattern, action) in routes {
            let weak = Arc::downgrade(&controller);
            controller.router.register(&pattern, move |route| {
                if let Some(controller) = weak.upgrade() {
                    action(&*controller, route);
                }
            });
        }

        if let Some(init) = init {
            init(&*controller);
        }
        controller
    }

    fn lock_slots(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_handler(&self) -> MutexGuard<'_, Option<Handler<RouterEvent>>> {
        self.route_handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Stage the view the next dispatch will make current
    pub fn set_next_view(&self, view: Arc<dyn Viewable>) {
        self.lock_slots().next = Some(view);
    }

    pub fn previous_view(&self) -> Option<Arc<dyn Viewable>> {
        self.lock_slots().previous.clone()
    }

    pub fn current_view(&self) -> Option<Arc<dyn Viewable>> {
        self.lock_slots().current.clone()
    }

    pub fn next_view(&self) -> Option<Arc<dyn Viewable>> {
        self.lock_slots().next.clone()
    }

    /// Stop reacting to router dispatches
    ///
    /// Registered routes stay in the router; their actions become no-ops once
    /// the controller is dropped.
    pub fn detach(&self) {
        if let Some(handler) = self.lock_handler().take() {
            self.router.unsubscribe(names::ROUTE, &handler);
        }
    }

    fn on_route(&self, route: &RouteMatch) {
        let (previous, current) = {
            let mut slots = self.lock_slots();
            if same_view(&slots.current, &slots.next) {
                tracing::debug!("View for \"{}\" already current.", route.pattern);
                slots.next = None;
                return;
            }
            slots.previous = slots.current.take();
            slots.current = slots.next.take();
            (slots.previous.clone(), slots.current.clone())
        };

        if let Some(previous) = previous {
            previous.set_enabled(false);
        }
        if let Some(current) = current {
            current.set_enabled(true);
        }

        self.trigger(&ControllerEvent::Transitioned {
            pattern: route.pattern.clone(),
        });
    }
}

impl Evented for Controller {
    type Event = ControllerEvent;

    fn events(&self) -> &EventEmitter<ControllerEvent> {
        &self.events
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.lock_slots();
        f.debug_struct("Controller")
            .field("router", &self.router)
            .field("has_previous", &slots.previous.is_some())
            .field("has_current", &slots.current.is_some())
            .field("has_next", &slots.next.is_some())
            .finish()
    }
}
