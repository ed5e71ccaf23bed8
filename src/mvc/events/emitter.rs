//! # Event Emitter
//!
//! Publisher-subscriber registry owned by every framework entity.
//! Entities expose it through the [`Evented`] trait, which supplies the
//! `subscribe`/`unsubscribe`/`trigger` surface as default methods.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An event that can be published through an [`EventEmitter`]
pub trait Event: fmt::Debug {
    /// Name the event is published under
    fn name(&self) -> &'static str;
}

/// Subscriber callback. Identity (for unsubscribe) is the `Arc` allocation.
pub type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

type Registry<E> = HashMap<String, Vec<Handler<E>>>;

/// Per-entity subscriber registry
///
/// Subscribers are kept in registration order and notified in that order.
/// The same handler may be registered several times and then fires once per
/// registration. The registry itself is only allocated on first subscribe.
pub struct EventEmitter<E> {
    registry: Mutex<Option<Registry<E>>>,
}

impl<E> EventEmitter<E> {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Registry<E>>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `handler` under `name`
    pub fn subscribe(&self, name: &str, handler: Handler<E>) {
        if name.is_empty() {
            tracing::warn!("Invalid parameter - name, non-empty string expected.");
            return;
        }

        tracing::debug!("Subscribed to \"{}\".", name);
        self.lock()
            .get_or_insert_with(HashMap::new)
            .entry(name.to_string())
            .or_default()
            .push(handler);
    }

    /// Remove every registration of `handler` under `name`
    pub fn unsubscribe(&self, name: &str, handler: &Handler<E>) {
        if name.is_empty() {
            tracing::warn!("Invalid parameter - name, non-empty string expected.");
            return;
        }

        let mut guard = self.lock();
        let Some(subscribers) = guard.as_mut().and_then(|registry| registry.get_mut(name)) else {
            return;
        };

        tracing::debug!("Unsubscribed to \"{}\".", name);
        subscribers.retain(|registered| !Arc::ptr_eq(registered, handler));
    }

    /// Notify every subscriber of `name` with `event`
    ///
    /// Handlers run against a snapshot taken here, with no lock held, so a
    /// handler may subscribe, unsubscribe or trigger on this emitter.
    pub fn trigger_ex(&self, name: &str, event: &E) {
        let snapshot = match self.lock().as_ref().and_then(|registry| registry.get(name)) {
            Some(subscribers) if !subscribers.is_empty() => subscribers.clone(),
            _ => return,
        };

        tracing::debug!("Triggered an event \"{}\".", name);
        for handler in snapshot {
            handler(event);
        }
    }

    /// Number of registrations currently held for `name`
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.lock()
            .as_ref()
            .and_then(|registry| registry.get(name))
            .map_or(0, Vec::len)
    }
}

impl<E: Event> EventEmitter<E> {
    /// Notify the subscribers of `event.name()`
    pub fn trigger(&self, event: &E) {
        self.trigger_ex(event.name(), event);
    }
}

impl<E> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.lock();
        let mut names: Vec<(&String, usize)> = guard
            .iter()
            .flat_map(|registry| registry.iter())
            .map(|(name, subscribers)| (name, subscribers.len()))
            .collect();
        names.sort();
        f.debug_struct("EventEmitter")
            .field("subscribers", &names)
            .finish()
    }
}

/// Publish/subscribe surface shared by every entity
///
/// Implementors only provide [`Evented::events`]; the rest delegates to the
/// owned emitter.
pub trait Evented {
    type Event: Event;

    fn events(&self) -> &EventEmitter<Self::Event>;

    /// Subscribe a closure and return the handle needed to unsubscribe it
    fn subscribe<F>(&self, name: &str, handler: F) -> Handler<Self::Event>
    where
        F: Fn(&Self::Event) + Send + Sync + 'static,
    {
        let handler: Handler<Self::Event> = Arc::new(handler);
        self.events().subscribe(name, handler.clone());
        handler
    }

    /// Subscribe an existing handle, e.g. to register it a second time
    fn subscribe_handler(&self, name: &str, handler: Handler<Self::Event>) {
        self.events().subscribe(name, handler);
    }

    fn unsubscribe(&self, name: &str, handler: &Handler<Self::Event>) {
        self.events().unsubscribe(name, handler);
    }

    fn trigger(&self, event: &Self::Event) {
        self.events().trigger(event);
    }

    fn trigger_ex(&self, name: &str, event: &Self::Event) {
        self.events().trigger_ex(name, event);
    }
}
