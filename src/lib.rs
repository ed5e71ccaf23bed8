//! # Corona - Hash-Routed MVC Micro-Framework
//!
//! Models, collections, views and controllers wired together by a hash
//! router and a publish/subscribe event mixin shared by every entity.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐  hashchange  ┌──────────┐  "route"   ┌──────────────┐
//! │ Location │─────────────▶│  Router  │───────────▶│  Controller  │
//! └──────────┘              └──────────┘            │ prev/cur/next│
//!                                 │ handler         └──────┬───────┘
//!                                 ▼                        │ enable / disable
//!                          set_next_view ──────────────────┤
//!                                                          ▼
//! ┌──────────────────┐   events   ┌─────────────────────────────┐
//! │ Model/Collection │───────────▶│ View / CompositeView        │
//! │  (HttpService)   │◀───────────│  template ──▶ Document      │
//! └──────────────────┘    json    └─────────────────────────────┘
//! ```
//!
//! Every entity owns an [`EventEmitter`] and implements [`Evented`], so
//! `subscribe`, `unsubscribe` and `trigger` look the same everywhere.

pub mod cmd_args;
pub mod config;
pub mod logging;
pub mod mvc;

// Re-export main types for easy access
pub use mvc::*;
