//! # Model
//!
//! A single record: an attribute map with defaults, shallow last-write-wins
//! merging, JSON conversion and CRUD helpers over HTTP. Network outcomes are
//! reported only through events.

use crate::mvc::events::{EventEmitter, Evented, ModelEvent};
use crate::mvc::services::{HttpFailure, HttpService};
use reqwest::Method;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Attribute map of a model
pub type Attributes = Map<String, Value>;

/// Hook run once at the end of construction
pub type ModelInit = Arc<dyn Fn(&Model) + Send + Sync>;

/// Construction-time overrides for a [`Model`]
#[derive(Clone, Default)]
pub struct ModelConfig {
    defaults: Attributes,
    http: HttpService,
    init: Option<ModelInit>,
}

impl ModelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes applied on construction and on every `reset`
    pub fn defaults(mut self, defaults: Attributes) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn http(mut self, http: HttpService) -> Self {
        self.http = http;
        self
    }

    pub fn init<F>(mut self, init: F) -> Self
    where
        F: Fn(&Model) + Send + Sync + 'static,
    {
        self.init = Some(Arc::new(init));
        self
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("defaults", &self.defaults)
            .field("has_init", &self.init.is_some())
            .finish()
    }
}

pub struct Model {
    defaults: Attributes,
    http: HttpService,
    attributes: Mutex<Attributes>,
    events: EventEmitter<ModelEvent>,
}

impl Model {
    pub fn new(config: ModelConfig) -> Self {
        Self::build(config, None)
    }

    /// Construct, then merge `attributes` over the defaults
    pub fn with_attributes(config: ModelConfig, attributes: Attributes) -> Self {
        Self::build(config, Some(attributes))
    }

    fn build(config: ModelConfig, attributes: Option<Attributes>) -> Self {
        let ModelConfig {
            defaults,
            http,
            init,
        } = config;
        let model = Self {
            defaults,
            http,
            attributes: Mutex::new(Attributes::new()),
            events: EventEmitter::new(),
        };

        model.reset();
        if let Some(attributes) = attributes {
            model.set(attributes);
        }
        if let Some(init) = init {
            init(&model);
        }
        model
    }

    fn lock(&self) -> MutexGuard<'_, Attributes> {
        self.attributes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        if key.is_empty() {
            tracing::warn!("Invalid parameter - key, non-empty string expected.");
            return None;
        }
        self.lock().get(key).cloned()
    }

    /// Merge `attributes` in, overwriting existing keys
    pub fn set(&self, attributes: Attributes) {
        {
            let mut current = self.lock();
            for (key, value) in &attributes {
                current.insert(key.clone(), value.clone());
            }
        }
        self.trigger(&ModelEvent::Changed { attributes });
    }

    /// Merge a JSON object; any other JSON value is rejected
    pub fn set_json(&self, value: &Value) {
        match value {
            Value::Object(attributes) => self.set(attributes.clone()),
            other => {
                tracing::warn!("Invalid parameter - attributes, object expected, got {}.", other);
            }
        }
    }

    /// Clear every attribute, then re-apply the defaults
    pub fn reset(&self) {
        self.lock().clear();
        self.trigger(&ModelEvent::Reset);
        self.set(self.defaults.clone());
    }

    /// True when every key/value pair of `criteria` is present here
    pub fn matches(&self, criteria: &Attributes) -> bool {
        let attributes = self.lock();
        criteria
            .iter()
            .all(|(key, value)| attributes.get(key) == Some(value))
    }

    pub fn json(&self) -> Attributes {
        self.lock().clone()
    }

    pub fn stringify(&self) -> String {
        Value::Object(self.json()).to_string()
    }

    /// GET `url` and replace the attributes with the response object
    pub async fn fetch(&self, url: &str) {
        if !valid_url(url) {
            return;
        }

        tracing::debug!("Fetching model @ \"{}\".", url);
        match self.http.request_json(Method::GET, url, None).await {
            Ok(Value::Object(attributes)) => {
                self.reset();
                self.set(attributes);
                self.trigger(&ModelEvent::FetchSuccess);
            }
            Ok(other) => self.trigger(&ModelEvent::FetchFailure {
                status: None,
                error: format!("parsererror: expected a JSON object, got {other}"),
            }),
            Err(HttpFailure { status, message }) => self.trigger(&ModelEvent::FetchFailure {
                status,
                error: message,
            }),
        }
    }

    /// POST `body` (or the model itself) to `url`
    pub async fn create(&self, url: &str, body: Option<Value>) {
        if !valid_url(url) {
            return;
        }

        tracing::debug!("Creating model @ \"{}\".", url);
        let body = body.unwrap_or_else(|| Value::Object(self.json()));
        match self.http.request_json(Method::POST, url, Some(&body)).await {
            Ok(_) => self.trigger(&ModelEvent::CreateSuccess),
            Err(HttpFailure { status, message }) => self.trigger(&ModelEvent::CreateFailure {
                status,
                error: message,
            }),
        }
    }

    /// PUT `body` (or the model itself) to `url`
    pub async fn update(&self, url: &str, body: Option<Value>) {
        if !valid_url(url) {
            return;
        }

        tracing::debug!("Updating model @ \"{}\".", url);
        let body = body.unwrap_or_else(|| Value::Object(self.json()));
        match self.http.request_json(Method::PUT, url, Some(&body)).await {
            Ok(_) => self.trigger(&ModelEvent::UpdateSuccess),
            Err(HttpFailure { status, message }) => self.trigger(&ModelEvent::UpdateFailure {
                status,
                error: message,
            }),
        }
    }

    /// DELETE `url`, sending `body` only when given
    pub async fn destroy(&self, url: &str, body: Option<Value>) {
        if !valid_url(url) {
            return;
        }

        tracing::debug!("Destroying model @ \"{}\".", url);
        match self.http.request_json(Method::DELETE, url, body.as_ref()).await {
            Ok(_) => self.trigger(&ModelEvent::DestroySuccess),
            Err(HttpFailure { status, message }) => self.trigger(&ModelEvent::DestroyFailure {
                status,
                error: message,
            }),
        }
    }
}

fn valid_url(url: &str) -> bool {
    if url.is_empty() {
        tracing::warn!("Invalid parameter - url, non-empty string expected.");
        return false;
    }
    true
}

impl Default for Model {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl Evented for Model {
    type Event = ModelEvent;

    fn events(&self) -> &EventEmitter<ModelEvent> {
        &self.events
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("attributes", &*self.lock())
            .finish()
    }
}
