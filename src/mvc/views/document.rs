//! # Document
//!
//! The DOM collaborator views render into and bind events on. A browser host
//! implements [`Document`] over its selector library; [`MemoryDocument`]
//! keeps element contents and bindings in memory.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A DOM event delivered to a bound handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    /// Event type, e.g. `click`
    pub kind: String,
    /// Element the handler was bound on
    pub element: String,
    /// Delegated selector the event originated from, if any
    pub target: Option<String>,
}

/// DOM event callback. Identity (for `off`) is the `Arc` allocation.
pub type DomHandler = Arc<dyn Fn(&DomEvent) + Send + Sync>;

pub trait Document: Send + Sync {
    /// Whether an element matches `selector`
    fn contains(&self, selector: &str) -> bool;

    /// Replace the inner HTML of the element matching `selector`
    fn set_html(&self, selector: &str, html: &str);

    /// Bind `handler` for `event` on `element`, delegated to `selector` if given
    fn on(&self, element: &str, event: &str, selector: Option<&str>, handler: DomHandler);

    /// Remove a binding made by [`Document::on`]
    fn off(&self, element: &str, event: &str, selector: Option<&str>, handler: &DomHandler);
}

struct Binding {
    element: String,
    event: String,
    selector: Option<String>,
    handler: DomHandler,
}

impl Binding {
    fn is(&self, element: &str, event: &str, selector: Option<&str>) -> bool {
        self.element == element && self.event == event && self.selector.as_deref() == selector
    }
}

/// In-memory document
#[derive(Default)]
pub struct MemoryDocument {
    elements: Mutex<HashMap<String, String>>,
    bindings: Mutex<Vec<Binding>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document containing empty elements for each selector
    pub fn with_elements<'a>(selectors: impl IntoIterator<Item = &'a str>) -> Self {
        let document = Self::new();
        for selector in selectors {
            document.insert(selector);
        }
        document
    }

    pub fn insert(&self, selector: &str) {
        self.lock_elements()
            .entry(selector.to_string())
            .or_default();
    }

    pub fn remove(&self, selector: &str) {
        self.lock_elements().remove(selector);
    }

    pub fn html(&self, selector: &str) -> Option<String> {
        self.lock_elements().get(selector).cloned()
    }

    /// Number of active bindings on `element`
    pub fn binding_count(&self, element: &str) -> usize {
        self.lock_bindings()
            .iter()
            .filter(|binding| binding.element == element)
            .count()
    }

    /// Fire `event` on `element` and return how many handlers ran
    ///
    /// Undelegated bindings always run; delegated ones only when `target`
    /// equals their selector.
    pub fn dispatch(&self, element: &str, event: &str, target: Option<&str>) -> usize {
        let handlers: Vec<DomHandler> = self
            .lock_bindings()
            .iter()
            .filter(|binding| binding.element == element && binding.event == event)
            .filter(|binding| match binding.selector.as_deref() {
                None => true,
                Some(selector) => target == Some(selector),
            })
            .map(|binding| binding.handler.clone())
            .collect();

        let dom_event = DomEvent {
            kind: event.to_string(),
            element: element.to_string(),
            target: target.map(str::to_string),
        };
        for handler in &handlers {
            handler(&dom_event);
        }
        handlers.len()
    }

    fn lock_elements(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_bindings(&self) -> MutexGuard<'_, Vec<Binding>> {
        self.bindings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("elements", &*self.lock_elements())
            .field("bindings", &self.lock_bindings().len())
            .finish()
    }
}

impl Document for MemoryDocument {
    fn contains(&self, selector: &str) -> bool {
        self.lock_elements().contains_key(selector)
    }

    fn set_html(&self, selector: &str, html: &str) {
        if let Some(content) = self.lock_elements().get_mut(selector) {
            *content = html.to_string();
        }
    }

    fn on(&self, element: &str, event: &str, selector: Option<&str>, handler: DomHandler) {
        self.lock_bindings().push(Binding {
            element: element.to_string(),
            event: event.to_string(),
            selector: selector.map(str::to_string),
            handler,
        });
    }

    fn off(&self, element: &str, event: &str, selector: Option<&str>, handler: &DomHandler) {
        self.lock_bindings().retain(|binding| {
            !(binding.is(element, event, selector) && Arc::ptr_eq(&binding.handler, handler))
        });
    }
}
