//! # View
//!
//! Renders a template against a model, a collection or explicit JSON into a
//! document element, and binds its DOM events while enabled.

use super::document::{Document, DomHandler};
use super::template;
use super::Viewable;
use crate::mvc::events::{EventEmitter, Evented, ViewEvent};
use crate::mvc::models::{Collection, Model};
use crate::mvc::services::HttpService;
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Replacement for the default render
pub type RenderFn = Arc<dyn Fn(&View) + Send + Sync>;

/// Hook run once at the end of construction
pub type ViewInit = Arc<dyn Fn(&View) + Send + Sync>;

/// Construction-time overrides for a [`View`]
#[derive(Clone, Default)]
pub struct ViewConfig {
    element: Option<String>,
    template: Option<String>,
    dom: Vec<(String, DomHandler)>,
    model: Option<Arc<Model>>,
    collection: Option<Arc<Collection>>,
    render: Option<RenderFn>,
    init: Option<ViewInit>,
}

impl ViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selector of the element the view renders into
    pub fn element(mut self, selector: impl Into<String>) -> Self {
        self.element = Some(selector.into());
        self
    }

    /// Template source text
    pub fn template(mut self, source: impl Into<String>) -> Self {
        self.template = Some(source.into());
        self
    }

    /// DOM binding keyed by `"event selector"`, e.g. `"click .delete"`
    pub fn dom<F>(mut self, key: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&super::DomEvent) + Send + Sync + 'static,
    {
        self.dom.push((key.into(), Arc::new(handler)));
        self
    }

    pub fn model(mut self, model: Arc<Model>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn collection(mut self, collection: Arc<Collection>) -> Self {
        self.collection = Some(collection);
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&View) + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn init<F>(mut self, init: F) -> Self
    where
        F: Fn(&View) + Send + Sync + 'static,
    {
        self.init = Some(Arc::new(init));
        self
    }
}

pub struct View {
    element: Option<String>,
    template: Mutex<Option<String>>,
    dom: Vec<(String, DomHandler)>,
    model: Option<Arc<Model>>,
    collection: Option<Arc<Collection>>,
    render_override: Option<RenderFn>,
    document: Arc<dyn Document>,
    enabled: AtomicBool,
    dom_registered: AtomicBool,
    events: EventEmitter<ViewEvent>,
}

impl View {
    pub fn new(config: ViewConfig, document: Arc<dyn Document>) -> Self {
        let ViewConfig {
            element,
            template,
            dom,
            model,
            collection,
            render,
            init,
        } = config;

        if element.is_none() {
            tracing::warn!("Undefined element found.");
        }
        if template.is_none() {
            tracing::debug!("Undefined template found.");
        }

        let view = Self {
            element,
            template: Mutex::new(template),
            dom,
            model,
            collection,
            render_override: render,
            document,
            enabled: AtomicBool::new(false),
            dom_registered: AtomicBool::new(false),
            events: EventEmitter::new(),
        };
        if let Some(init) = init {
            init(&view);
        }
        view
    }

    fn lock_template(&self) -> MutexGuard<'_, Option<String>> {
        self.template.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn element(&self) -> Option<&str> {
        self.element.as_deref()
    }

    pub fn model(&self) -> Option<&Arc<Model>> {
        self.model.as_ref()
    }

    pub fn collection(&self) -> Option<&Arc<Collection>> {
        self.collection.as_ref()
    }

    pub fn document(&self) -> &Arc<dyn Document> {
        &self.document
    }

    pub fn template(&self) -> Option<String> {
        self.lock_template().clone()
    }

    pub fn set_template(&self, source: impl Into<String>) {
        *self.lock_template() = Some(source.into());
    }

    /// Load the template text from `url`; on failure the template is empty
    pub async fn load_template(&self, http: &HttpService, url: &str) {
        match http.get_text(url).await {
            Ok(source) => self.set_template(source),
            Err(e) => {
                tracing::warn!("Cannot retrieve template URL \"{}\": {}", url, e);
                self.set_template(String::new());
            }
        }
    }

    /// Build HTML from `json`, or from the model, or from each model of the
    /// collection, in that order of preference
    ///
    /// A template that fails to render contributes an empty string.
    pub fn build(&self, json: Option<&Value>) -> Option<String> {
        let Some(source) = self.template() else {
            tracing::warn!("Undefined template found.");
            return None;
        };

        if let Some(json) = json {
            return Some(render_or_blank(&source, json));
        }
        if let Some(model) = &self.model {
            return Some(render_or_blank(&source, &Value::Object(model.json())));
        }
        if let Some(collection) = &self.collection {
            let mut html = String::new();
            collection.each(|model| {
                html.push_str(&render_or_blank(&source, &Value::Object(model.json())));
            });
            return Some(html);
        }
        Some(render_or_blank(&source, &Value::Object(Default::default())))
    }

    /// Default render: writes `build()` into the element while enabled
    pub fn default_render(&self) {
        if !self.is_enabled() {
            return;
        }

        let Some(element) = self.element.as_deref() else {
            tracing::warn!("Undefined element found.");
            return;
        };
        if !self.document.contains(element) {
            tracing::warn!("Undefined element found: \"{}\".", element);
            return;
        }

        tracing::debug!("Default render used for \"{}\".", element);
        self.trigger(&ViewEvent::RenderBefore);
        let html = self.build(None).unwrap_or_default();
        self.document.set_html(element, &html);
        self.trigger(&ViewEvent::RenderAfter);
    }

    /// Bind `handler` for DOM `event` on the element; an empty selector
    /// binds on the element itself
    pub fn on(&self, event: &str, selector: &str, handler: DomHandler) {
        if let Some((element, selector)) = self.binding_target(event, selector) {
            self.document.on(element, event, selector, handler);
        }
    }

    pub fn off(&self, event: &str, selector: &str, handler: &DomHandler) {
        if let Some((element, selector)) = self.binding_target(event, selector) {
            self.document.off(element, event, selector, handler);
        }
    }

    fn binding_target<'a>(
        &'a self,
        event: &str,
        selector: &'a str,
    ) -> Option<(&'a str, Option<&'a str>)> {
        if event.is_empty() {
            tracing::warn!("Invalid parameter - event, non-empty string expected.");
            return None;
        }
        let Some(element) = self.element.as_deref() else {
            tracing::warn!("Undefined element found.");
            return None;
        };
        Some((element, (!selector.is_empty()).then_some(selector)))
    }
}

fn render_or_blank(source: &str, data: &Value) -> String {
    template::render(source, data).unwrap_or_else(|e| {
        tracing::warn!("{:#}", e);
        String::new()
    })
}

/// Split a `"event selector"` key on its first run of whitespace
fn split_dom_key(key: &str) -> Option<(&str, &str)> {
    let key = key.trim_start();
    let (event, selector) = match key.split_once(char::is_whitespace) {
        Some((event, rest)) => (event, rest.trim_start()),
        None => (key, ""),
    };
    (!event.is_empty()).then_some((event, selector))
}

impl Viewable for View {
    fn render(&self) {
        match &self.render_override {
            Some(render) => render(self),
            None => self.default_render(),
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set_enabled(&self, enabled: bool) {
        if self.enabled.swap(enabled, Ordering::SeqCst) == enabled {
            return;
        }

        if enabled {
            self.register_dom_events();
            self.trigger(&ViewEvent::Enabled);
        } else {
            self.unregister_dom_events();
            self.trigger(&ViewEvent::Disabled);
        }
    }

    fn register_dom_events(&self) {
        if self.dom_registered.swap(true, Ordering::SeqCst) {
            return;
        }
        for (key, handler) in &self.dom {
            if let Some((event, selector)) = split_dom_key(key) {
                self.on(event, selector, handler.clone());
            }
        }
    }

    fn unregister_dom_events(&self) {
        if !self.dom_registered.swap(false, Ordering::SeqCst) {
            return;
        }
        for (key, handler) in &self.dom {
            if let Some((event, selector)) = split_dom_key(key) {
                self.off(event, selector, handler);
            }
        }
    }
}

impl Evented for View {
    type Event = ViewEvent;

    fn events(&self) -> &EventEmitter<ViewEvent> {
        &self.events
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("element", &self.element)
            .field("enabled", &self.is_enabled())
            .field("dom", &self.dom.iter().map(|(key, _)| key).collect::<Vec<_>>())
            .finish()
    }
}
