//! # Collection
//!
//! Ordered list of models with bulk fetch, add/remove and JSON conversion.
//!
//! Two removal flavours exist: [`Collection::remove`] drops every occurrence
//! of one model instance, [`Collection::remove_where`] drops every model
//! whose attributes contain a given subset.

use super::model::{Attributes, Model, ModelConfig};
use crate::mvc::events::{CollectionEvent, EventEmitter, Evented};
use crate::mvc::services::{HttpFailure, HttpService};
use reqwest::Method;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Hook run once at the end of construction
pub type CollectionInit = Arc<dyn Fn(&Collection) + Send + Sync>;

/// Construction-time overrides for a [`Collection`]
#[derive(Clone, Default)]
pub struct CollectionConfig {
    model: ModelConfig,
    http: HttpService,
    init: Option<CollectionInit>,
}

impl CollectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration used for models created by `fetch`
    pub fn model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    pub fn http(mut self, http: HttpService) -> Self {
        self.http = http;
        self
    }

    pub fn init<F>(mut self, init: F) -> Self
    where
        F: Fn(&Collection) + Send + Sync + 'static,
    {
        self.init = Some(Arc::new(init));
        self
    }
}

impl fmt::Debug for CollectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionConfig")
            .field("model", &self.model)
            .field("has_init", &self.init.is_some())
            .finish()
    }
}

pub struct Collection {
    model: ModelConfig,
    http: HttpService,
    models: Mutex<Vec<Arc<Model>>>,
    events: EventEmitter<CollectionEvent>,
}

impl Collection {
    pub fn new(config: CollectionConfig) -> Self {
        Self::with_models(config, Vec::new())
    }

    /// Construct, then `add_all(models)` before the init hook runs
    pub fn with_models(config: CollectionConfig, models: Vec<Arc<Model>>) -> Self {
        let CollectionConfig { model, http, init } = config;
        let collection = Self {
            model,
            http,
            models: Mutex::new(Vec::new()),
            events: EventEmitter::new(),
        };

        collection.reset();
        collection.add_all(models);
        if let Some(init) = init {
            init(&collection);
        }
        collection
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<Model>>> {
        self.models.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, model: Arc<Model>) {
        self.lock().push(model.clone());
        self.trigger(&CollectionEvent::Added { model });
    }

    pub fn add_all(&self, models: impl IntoIterator<Item = Arc<Model>>) {
        for model in models {
            self.add(model);
        }
    }

    /// Remove every occurrence of this model instance; returns how many
    pub fn remove(&self, model: &Arc<Model>) -> usize {
        self.remove_matching(|candidate| Arc::ptr_eq(candidate, model))
    }

    /// Remove every model whose attributes contain `criteria`; returns how many
    pub fn remove_where(&self, criteria: &Attributes) -> usize {
        self.remove_matching(|candidate| candidate.matches(criteria))
    }

    fn remove_matching<P>(&self, predicate: P) -> usize
    where
        P: Fn(&Arc<Model>) -> bool,
    {
        let removed: Vec<Arc<Model>> = {
            let mut models = self.lock();
            let (removed, kept): (Vec<_>, Vec<_>) =
                models.drain(..).partition(|model| predicate(model));
            *models = kept;
            removed
        };

        for model in &removed {
            self.trigger(&CollectionEvent::Removed {
                model: model.clone(),
            });
        }
        removed.len()
    }

    /// Visit every model, in order, over a snapshot
    pub fn each<F>(&self, mut visit: F)
    where
        F: FnMut(&Arc<Model>),
    {
        for model in self.models() {
            visit(&model);
        }
    }

    pub fn models(&self) -> Vec<Arc<Model>> {
        self.lock().clone()
    }

    pub fn get(&self, index: usize) -> Option<Arc<Model>> {
        self.lock().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn reset(&self) {
        self.lock().clear();
        self.trigger(&CollectionEvent::Reset);
    }

    pub fn json(&self) -> Vec<Value> {
        self.models()
            .iter()
            .map(|model| Value::Object(model.json()))
            .collect()
    }

    pub fn stringify(&self) -> String {
        Value::Array(self.json()).to_string()
    }

    /// GET `url` and rebuild the collection from the returned array
    pub async fn fetch(&self, url: &str) {
        if url.is_empty() {
            tracing::warn!("Invalid parameter - url, non-empty string expected.");
            return;
        }

        tracing::debug!("Fetching from \"{}\".", url);
        match self.http.request_json(Method::GET, url, None).await {
            Ok(Value::Array(items)) => {
                self.lock().clear();
                for item in &items {
                    let model = Model::new(self.model.clone());
                    model.set_json(item);
                    self.add(Arc::new(model));
                }
                self.trigger(&CollectionEvent::FetchSuccess);
            }
            Ok(other) => self.trigger(&CollectionEvent::FetchFailure {
                status: None,
                error: format!("parsererror: expected a JSON array, got {other}"),
            }),
            Err(HttpFailure { status, message }) => {
                self.trigger(&CollectionEvent::FetchFailure {
                    status,
                    error: message,
                })
            }
        }
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new(CollectionConfig::default())
    }
}

impl Evented for Collection {
    type Event = CollectionEvent;

    fn events(&self) -> &EventEmitter<CollectionEvent> {
        &self.events
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("models", &*self.lock())
            .finish()
    }
}
