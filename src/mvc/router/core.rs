//! # Router
//!
//! Matches the navigation hash against registered routes in registration
//! order and dispatches to the first match.
//!
//! ```text
//! Location ──hashchange──▶ Router::dispatch ──▶ route handler
//!                                  │
//!                                  └──────────▶ "route" event ──▶ Controllers
//! ```

use super::location::{hash_of, Location, MemoryLocation};
use super::pattern::{RouteMatch, RoutePattern};
use crate::mvc::events::{EventEmitter, Evented, RouterEvent};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Callback invoked when its route matches
pub type RouteHandler = Arc<dyn Fn(&RouteMatch) + Send + Sync>;

struct Route {
    pattern: RoutePattern,
    handler: RouteHandler,
}

/// Hash router
///
/// Routes are only ever appended. More specific routes must be registered
/// before more general ones, since the first structural match wins.
pub struct Router {
    routes: Mutex<Vec<Arc<Route>>>,
    location: Arc<dyn Location>,
    listening: AtomicBool,
    events: EventEmitter<RouterEvent>,
}

impl Router {
    pub fn new(location: Arc<dyn Location>) -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
            location,
            listening: AtomicBool::new(false),
            events: EventEmitter::new(),
        }
    }

    /// Router over a fresh [`MemoryLocation`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryLocation::new()))
    }

    /// Construct and run `init` once before handing the router out
    pub fn with_init<F>(location: Arc<dyn Location>, init: F) -> Self
    where
        F: FnOnce(&Router),
    {
        let router = Self::new(location);
        init(&router);
        router
    }

    fn lock_routes(&self) -> MutexGuard<'_, Vec<Arc<Route>>> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `handler` for `pattern`
    pub fn register<F>(&self, pattern: &str, handler: F)
    where
        F: Fn(&RouteMatch) + Send + Sync + 'static,
    {
        self.register_handler(pattern, Arc::new(handler));
    }

    pub fn register_handler(&self, pattern: &str, handler: RouteHandler) {
        let compiled = match RoutePattern::compile(pattern) {
            Ok(compiled) => compiled,
            Err(e) => {
                tracing::warn!("Invalid parameter - route \"{}\" does not compile: {}", pattern, e);
                return;
            }
        };

        tracing::debug!("Registering route \"{}\".", pattern);
        self.lock_routes().push(Arc::new(Route {
            pattern: compiled,
            handler,
        }));
    }

    /// Registered patterns in match order
    pub fn routes(&self) -> Vec<String> {
        self.lock_routes()
            .iter()
            .map(|route| route.pattern.source().to_string())
            .collect()
    }

    pub fn location(&self) -> &Arc<dyn Location> {
        &self.location
    }

    pub fn is_started(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    /// Start listening for hash changes and dispatch the current hash once
    pub fn start(self: &Arc<Self>) {
        if self.lock_routes().is_empty() {
            tracing::warn!("No routes registered.");
            return;
        }

        if !self.listening.swap(true, Ordering::SeqCst) {
            let router = Arc::downgrade(self);
            self.location.on_change(Arc::new(move || {
                if let Some(router) = router.upgrade() {
                    router.dispatch();
                }
            }));
        }

        self.dispatch();
    }

    /// Change the hash; matching happens when the location reports the change
    pub fn navigate(&self, hash: &str) {
        tracing::debug!("Navigating to \"#{}\".", hash);
        self.location.set_hash(hash);
    }

    pub fn current_hash(&self) -> String {
        hash_of(&self.location.href()).to_string()
    }

    /// Dispatch the current hash to the first matching route
    ///
    /// The route handler fires before the `route` event. Returns the match,
    /// or `None` when no route accepted the hash.
    pub fn dispatch(&self) -> Option<RouteMatch> {
        let hash = self.current_hash();
        let routes = self.lock_routes().clone();

        let found = routes
            .iter()
            .find_map(|route| route.pattern.matches(&hash).map(|found| (route, found)));

        let Some((route, found)) = found else {
            tracing::warn!("No routes available for \"#{}\".", hash);
            return None;
        };

        tracing::debug!("Routing \"#{}\" to \"{}\".", hash, found.pattern);
        (route.handler)(&found);
        self.trigger(&RouterEvent::Route(found.clone()));
        Some(found)
    }
}

impl Evented for Router {
    type Event = RouterEvent;

    fn events(&self) -> &EventEmitter<RouterEvent> {
        &self.events
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes())
            .field("listening", &self.is_started())
            .field("events", &self.events)
            .finish()
    }
}
