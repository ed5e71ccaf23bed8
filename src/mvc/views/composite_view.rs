//! # Composite View
//!
//! A named group of views rendered, enabled and disabled together. Children
//! are kept in insertion order; a swapped child moves to the end.

use super::Viewable;
use crate::mvc::events::{CompositeViewEvent, EventEmitter, Evented};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type CompositeViewInit = Arc<dyn Fn(&CompositeView) + Send + Sync>;

type Children = Vec<(String, Arc<dyn Viewable>)>;

/// Construction-time overrides for a [`CompositeView`]
#[derive(Clone, Default)]
pub struct CompositeViewConfig {
    views: Children,
    init: Option<CompositeViewInit>,
}

impl CompositeViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default child, added on construction and on every `reset`
    pub fn view(mut self, name: impl Into<String>, view: Arc<dyn Viewable>) -> Self {
        self.views.push((name.into(), view));
        self
    }

    pub fn init<F>(mut self, init: F) -> Self
    where
        F: Fn(&CompositeView) + Send + Sync + 'static,
    {
        self.init = Some(Arc::new(init));
        self
    }
}

pub struct CompositeView {
    defaults: Children,
    views: Mutex<Children>,
    enabled: AtomicBool,
    events: EventEmitter<CompositeViewEvent>,
}

impl CompositeView {
    pub fn new(config: CompositeViewConfig) -> Self {
        let CompositeViewConfig { views, init } = config;
        let composite = Self {
            defaults: views,
            views: Mutex::new(Vec::new()),
            enabled: AtomicBool::new(false),
            events: EventEmitter::new(),
        };

        composite.reset();
        if let Some(init) = init {
            init(&composite);
        }
        composite
    }

    fn lock(&self) -> MutexGuard<'_, Children> {
        self.views.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a child under `name`; an existing name is left untouched
    pub fn add(&self, name: &str, view: Arc<dyn Viewable>) -> bool {
        {
            let mut views = self.lock();
            if views.iter().any(|(existing, _)| existing == name) {
                tracing::warn!("Cannot add existing view \"{}\".", name);
                return false;
            }
            views.push((name.to_string(), view));
        }

        self.trigger(&CompositeViewEvent::Added {
            name: name.to_string(),
        });
        true
    }

    pub fn remove(&self, name: &str) -> Option<Arc<dyn Viewable>> {
        let removed = {
            let mut views = self.lock();
            let position = views.iter().position(|(existing, _)| existing == name);
            position.map(|index| views.remove(index).1)
        };

        match removed {
            Some(view) => {
                self.trigger(&CompositeViewEvent::Removed {
                    name: name.to_string(),
                });
                Some(view)
            }
            None => {
                tracing::warn!("Cannot remove non-existent view \"{}\".", name);
                None
            }
        }
    }

    /// Replace the child under `name` and return the old one
    ///
    /// Emits `removed`, `added`, then `swapped`. Nothing happens when `name`
    /// is not present.
    pub fn swap(&self, name: &str, view: Arc<dyn Viewable>) -> Option<Arc<dyn Viewable>> {
        let old = self.remove(name)?;
        self.add(name, view);
        self.trigger(&CompositeViewEvent::Swapped {
            name: name.to_string(),
        });
        Some(old)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Viewable>> {
        self.lock()
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, view)| view.clone())
    }

    pub fn names(&self) -> Vec<String> {
        self.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Visit every child over a snapshot
    pub fn each<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &Arc<dyn Viewable>),
    {
        let snapshot = self.lock().clone();
        for (name, view) in &snapshot {
            visit(name, view);
        }
    }

    /// Clear the children, then re-add the configured defaults
    pub fn reset(&self) {
        self.lock().clear();
        self.trigger(&CompositeViewEvent::Reset);

        for (name, view) in &self.defaults {
            self.add(name, view.clone());
        }
    }
}

impl Viewable for CompositeView {
    fn render(&self) {
        if !self.is_enabled() {
            return;
        }

        self.trigger(&CompositeViewEvent::RenderBefore);
        self.each(|_, view| view.render());
        self.trigger(&CompositeViewEvent::RenderAfter);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set_enabled(&self, enabled: bool) {
        if self.enabled.swap(enabled, Ordering::SeqCst) == enabled {
            return;
        }

        self.each(|_, view| view.set_enabled(enabled));
        if enabled {
            self.trigger(&CompositeViewEvent::Enabled);
        } else {
            self.trigger(&CompositeViewEvent::Disabled);
        }
    }

    fn register_dom_events(&self) {
        self.each(|_, view| view.register_dom_events());
    }

    fn unregister_dom_events(&self) {
        self.each(|_, view| view.unregister_dom_events());
    }
}

impl Evented for CompositeView {
    type Event = CompositeViewEvent;

    fn events(&self) -> &EventEmitter<CompositeViewEvent> {
        &self.events
    }
}

impl fmt::Debug for CompositeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeView")
            .field("views", &self.names())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvc::events::names;
    use crate::mvc::views::{MemoryDocument, View, ViewConfig};

    #[derive(Default)]
    struct Probe {
        enabled: AtomicBool,
        renders: Mutex<usize>,
    }

    impl Viewable for Probe {
        fn render(&self) {
            *self.renders.lock().unwrap() += 1;
        }

        fn is_enabled(&self) -> bool {
            self.enabled.load(Ordering::SeqCst)
        }

        fn set_enabled(&self, enabled: bool) {
            self.enabled.store(enabled, Ordering::SeqCst);
        }

        fn register_dom_events(&self) {}

        fn unregister_dom_events(&self) {}
    }

    fn record(composite: &CompositeView) -> Arc<Mutex<Vec<CompositeViewEvent>>> {
        let received = Arc::new(Mutex::new(Vec::new()));
        for name in [
            names::ADDED,
            names::REMOVED,
            names::SWAPPED,
            names::RESET,
            names::RENDER_BEFORE,
            names::RENDER_AFTER,
            names::ENABLED,
            names::DISABLED,
        ] {
            let received = received.clone();
            composite.subscribe(name, move |event| received.lock().unwrap().push(event.clone()));
        }
        received
    }

    fn added(name: &str) -> CompositeViewEvent {
        CompositeViewEvent::Added {
            name: name.to_string(),
        }
    }

    #[test]
    fn add_should_reject_duplicate_names() {
        let composite = CompositeView::new(CompositeViewConfig::new());
        let received = record(&composite);

        assert!(composite.add("header", Arc::new(Probe::default())));
        assert!(!composite.add("header", Arc::new(Probe::default())));

        assert_eq!(composite.names(), vec!["header"]);
        assert_eq!(*received.lock().unwrap(), vec![added("header")]);
    }

    #[test]
    fn remove_should_return_view_or_none() {
        let composite = CompositeView::new(CompositeViewConfig::new());
        composite.add("body", Arc::new(Probe::default()));

        assert!(composite.remove("body").is_some());
        assert!(composite.remove("body").is_none());
        assert!(composite.is_empty());
    }

    #[test]
    fn swap_should_emit_removed_added_swapped() {
        let first: Arc<dyn Viewable> = Arc::new(Probe::default());
        let second: Arc<dyn Viewable> = Arc::new(Probe::default());
        let composite = CompositeView::new(CompositeViewConfig::new().view("main", first.clone()));
        let received = record(&composite);

        let old = composite.swap("main", second.clone());

        assert!(Arc::ptr_eq(&old.unwrap(), &first));
        assert!(Arc::ptr_eq(&composite.get("main").unwrap(), &second));
        assert_eq!(
            *received.lock().unwrap(),
            vec![
                CompositeViewEvent::Removed {
                    name: "main".to_string()
                },
                added("main"),
                CompositeViewEvent::Swapped {
                    name: "main".to_string()
                },
            ]
        );
        assert!(composite.swap("missing", second).is_none());
    }

    #[test]
    fn reset_should_restore_default_views() {
        let composite = CompositeView::new(
            CompositeViewConfig::new()
                .view("a", Arc::new(Probe::default()))
                .view("b", Arc::new(Probe::default())),
        );
        composite.remove("a");
        composite.add("c", Arc::new(Probe::default()));
        let received = record(&composite);

        composite.reset();

        assert_eq!(composite.names(), vec!["a", "b"]);
        assert_eq!(
            *received.lock().unwrap(),
            vec![CompositeViewEvent::Reset, added("a"), added("b")]
        );
    }

    #[test]
    fn render_should_fan_out_only_while_enabled() {
        let child = Arc::new(Probe::default());
        let composite = CompositeView::new(CompositeViewConfig::new().view("child", child.clone()));

        composite.render();
        assert_eq!(*child.renders.lock().unwrap(), 0);

        composite.set_enabled(true);
        let received = record(&composite);
        composite.render();

        assert_eq!(*child.renders.lock().unwrap(), 1);
        assert_eq!(
            *received.lock().unwrap(),
            vec![CompositeViewEvent::RenderBefore, CompositeViewEvent::RenderAfter]
        );
    }

    #[test]
    fn set_enabled_should_propagate_to_children_once() {
        let child = Arc::new(Probe::default());
        let composite = CompositeView::new(CompositeViewConfig::new().view("child", child.clone()));
        let received = record(&composite);

        composite.set_enabled(true);
        composite.set_enabled(true);
        assert!(child.is_enabled());

        composite.set_enabled(false);
        assert!(!child.is_enabled());
        assert_eq!(
            *received.lock().unwrap(),
            vec![CompositeViewEvent::Enabled, CompositeViewEvent::Disabled]
        );
    }

    #[test]
    fn composite_should_nest_and_render_real_views() {
        let document = Arc::new(MemoryDocument::with_elements(["#title", "#body"]));
        let title = Arc::new(View::new(
            ViewConfig::new().element("#title").template("Title"),
            document.clone(),
        ));
        let body = Arc::new(View::new(
            ViewConfig::new().element("#body").template("Body"),
            document.clone(),
        ));
        let inner = Arc::new(CompositeView::new(CompositeViewConfig::new().view("body", body)));
        let outer = CompositeView::new(
            CompositeViewConfig::new()
                .view("title", title)
                .view("inner", inner),
        );

        outer.set_enabled(true);
        outer.render();

        assert_eq!(document.html("#title").as_deref(), Some("Title"));
        assert_eq!(document.html("#body").as_deref(), Some("Body"));
    }
}
