//! # Model Events
//!
//! Events emitted by [`Model`] and [`Collection`] when their data changes or
//! a network operation completes.

use super::emitter::Event;
use super::names;
use crate::mvc::models::Model;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Events emitted by a [`Model`]
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    FetchSuccess,
    FetchFailure { status: Option<u16>, error: String },
    CreateSuccess,
    CreateFailure { status: Option<u16>, error: String },
    UpdateSuccess,
    UpdateFailure { status: Option<u16>, error: String },
    DestroySuccess,
    DestroyFailure { status: Option<u16>, error: String },
    /// Attributes were merged in; carries the merged subset
    Changed { attributes: Map<String, Value> },
    /// Attributes were cleared, defaults follow as a `Changed`
    Reset,
}

impl Event for ModelEvent {
    fn name(&self) -> &'static str {
        match self {
            ModelEvent::FetchSuccess => names::FETCH_SUCCESS,
            ModelEvent::FetchFailure { .. } => names::FETCH_FAILURE,
            ModelEvent::CreateSuccess => names::CREATE_SUCCESS,
            ModelEvent::CreateFailure { .. } => names::CREATE_FAILURE,
            ModelEvent::UpdateSuccess => names::UPDATE_SUCCESS,
            ModelEvent::UpdateFailure { .. } => names::UPDATE_FAILURE,
            ModelEvent::DestroySuccess => names::DESTROY_SUCCESS,
            ModelEvent::DestroyFailure { .. } => names::DESTROY_FAILURE,
            ModelEvent::Changed { .. } => names::CHANGED,
            ModelEvent::Reset => names::RESET,
        }
    }
}

/// Events emitted by a [`Collection`](crate::mvc::models::Collection)
#[derive(Debug, Clone)]
pub enum CollectionEvent {
    Added { model: Arc<Model> },
    Removed { model: Arc<Model> },
    Reset,
    FetchSuccess,
    FetchFailure { status: Option<u16>, error: String },
}

impl Event for CollectionEvent {
    fn name(&self) -> &'static str {
        match self {
            CollectionEvent::Added { .. } => names::ADDED,
            CollectionEvent::Removed { .. } => names::REMOVED,
            CollectionEvent::Reset => names::RESET,
            CollectionEvent::FetchSuccess => names::FETCH_SUCCESS,
            CollectionEvent::FetchFailure { .. } => names::FETCH_FAILURE,
        }
    }
}
