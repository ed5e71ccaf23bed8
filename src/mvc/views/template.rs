//! # Templates
//!
//! One-off [Tera](https://keats.github.io/tera/) rendering over JSON data.
//! Output is HTML-escaped unless marked `| safe`:
//!
//! - `{{ title }}` inserts the value escaped
//! - `{{ title | safe }}` inserts the value as-is
//!
//! Dotted keys (`author.name`) walk nested objects and `null` renders as the
//! empty string. A key missing from the data is a render error; use
//! `| default(value="")` for optional ones.

use anyhow::{Context as _, Result};
use serde_json::Value;
use tera::{Context, Tera};

/// Render `source` against `data`, which must be a JSON object
pub fn render(source: &str, data: &Value) -> Result<String> {
    let context = Context::from_serialize(data).context("Template data is not an object")?;
    Tera::one_off(source, &context, true).context("Failed to render template")
}
