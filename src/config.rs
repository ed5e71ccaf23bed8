//! Configuration constants and the routes file loader for corona
//!
//! The routes file is INI:
//!
//! ```ini
//! [routes]
//! users/$id = user
//! files/*path = file
//!
//! [router]
//! default = home
//!
//! [http]
//! timeout_secs = 10
//! base_url = http://localhost:8080
//! ```
//!
//! `[routes]` entries register in file order; the `[router] default` entry is
//! the empty-pattern route and registers last.

use crate::mvc::services::{HttpSettings, DEFAULT_TIMEOUT};
use anyhow::{Context, Result};
use ini::Ini;
use std::path::Path;
use std::time::Duration;

/// Default routes file path for corona
pub const DEFAULT_ROUTES_PATH: &str = "~/.corona/routes";

/// Environment variable name for overriding the routes path
pub const ROUTES_PATH_ENV_VAR: &str = "CORONA_ROUTES_PATH";

/// Environment variable holding the tracing filter
pub const LOG_LEVEL_ENV_VAR: &str = "CORONA_LOG_LEVEL";

const ROUTES_SECTION: &str = "routes";
const ROUTER_SECTION: &str = "router";
const HTTP_SECTION: &str = "http";

/// Get the routes file path, checking environment variable first, then falling back to default
pub fn get_routes_path() -> String {
    std::env::var_os(ROUTES_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_ROUTES_PATH.to_string())
}

/// Routes and HTTP settings read from a routes file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutesConfig {
    routes: Vec<(String, String)>,
    default: Option<String>,
    http: HttpSettings,
}

impl RoutesConfig {
    /// Load from `path` after `~`/env expansion; a missing file is empty
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::full(path)
            .with_context(|| format!("Cannot expand routes path \"{path}\""))?;
        let expanded = Path::new(&*expanded);

        if !expanded.exists() {
            tracing::debug!("Routes file {:?} not found, using empty config", expanded);
            return Ok(Self::default());
        }

        tracing::debug!("Loading routes from {:?}", expanded);
        let ini = Ini::load_from_file(expanded)
            .with_context(|| format!("Cannot read routes file {expanded:?}"))?;
        Self::from_ini(&ini)
    }

    pub fn from_ini(ini: &Ini) -> Result<Self> {
        let routes = ini
            .section(Some(ROUTES_SECTION))
            .map(|section| {
                section
                    .iter()
                    .map(|(pattern, name)| (pattern.to_string(), name.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        let default = ini
            .get_from(Some(ROUTER_SECTION), "default")
            .map(str::to_string);

        let timeout = match ini.get_from(Some(HTTP_SECTION), "timeout_secs") {
            Some(secs) => Duration::from_secs(
                secs.trim()
                    .parse()
                    .with_context(|| format!("Invalid timeout_secs \"{secs}\""))?,
            ),
            None => DEFAULT_TIMEOUT,
        };
        let base_url = ini
            .get_from(Some(HTTP_SECTION), "base_url")
            .map(|url| url.trim_end_matches('/').to_string());

        Ok(Self {
            routes,
            default,
            http: HttpSettings { timeout, base_url },
        })
    }

    /// `(pattern, name)` pairs in registration order, default route last
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = self.routes.clone();
        if let Some(name) = &self.default {
            entries.push((String::new(), name.clone()));
        }
        entries
    }

    pub fn default_route(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn http(&self) -> &HttpSettings {
        &self.http
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.default.is_none()
    }
}
