//! # HTTP Service
//!
//! JSON-over-HTTP transport used by models, collections and template
//! loading. Failures come back as [`HttpFailure`] so callers can turn them
//! into `*Failure` events.

use anyhow::Result;
use reqwest::{Client, Method};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`HttpService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub timeout: Duration,
    /// Prefix for relative URLs (those starting with `/`)
    pub base_url: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            base_url: None,
        }
    }
}

/// A failed request: transport error, non-2xx status or unparsable body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFailure {
    /// Response status, when a response arrived
    pub status: Option<u16>,
    pub message: String,
}

impl HttpFailure {
    fn transport(error: reqwest::Error) -> Self {
        Self {
            status: error.status().map(|status| status.as_u16()),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {status}: {}", self.message),
            None => write!(f, "HTTP request failed: {}", self.message),
        }
    }
}

impl std::error::Error for HttpFailure {}

/// Client behind every default [`HttpService`], built on first use
static SHARED_CLIENT: OnceLock<Option<Client>> = OnceLock::new();

fn shared_client() -> Option<Client> {
    SHARED_CLIENT
        .get_or_init(|| {
            Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .map_err(|e| tracing::warn!("Cannot build HTTP client: {}", e))
                .ok()
        })
        .clone()
}

/// Shared HTTP client; cloning is cheap
///
/// A service whose client could not be built fails every request.
#[derive(Debug, Clone)]
pub struct HttpService {
    client: Option<Client>,
    base_url: Option<String>,
}

impl HttpService {
    /// Service over the process-wide default client
    pub fn new() -> Self {
        Self {
            client: shared_client(),
            base_url: None,
        }
    }

    pub fn with_settings(settings: &HttpSettings) -> Result<Self> {
        tracing::debug!("Creating HttpService with {:?}", settings);
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client: Some(client),
            base_url: settings
                .base_url
                .as_ref()
                .map(|base| base.trim_end_matches('/').to_string()),
        })
    }

    fn client(&self) -> std::result::Result<&Client, HttpFailure> {
        self.client.as_ref().ok_or_else(|| HttpFailure {
            status: None,
            message: "HTTP client unavailable".to_string(),
        })
    }

    /// Prefix root-relative URLs with the configured base URL
    pub fn resolve(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if url.starts_with('/') => format!("{base}{url}"),
            _ => url.to_string(),
        }
    }

    /// Send a request with an optional JSON body and decode a JSON response
    ///
    /// An empty response body decodes to `Value::Null`.
    pub async fn request_json(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> std::result::Result<Value, HttpFailure> {
        let url = self.resolve(url);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client()?
            .request(method, &url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(HttpFailure::transport)?;
        let status = response.status();
        let text = response.text().await.map_err(HttpFailure::transport)?;

        if !status.is_success() {
            return Err(HttpFailure {
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| text.clone()),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| HttpFailure {
            status: Some(status.as_u16()),
            message: format!("parsererror: {e}"),
        })
    }

    /// GET a resource as text, e.g. a template
    pub async fn get_text(&self, url: &str) -> std::result::Result<String, HttpFailure> {
        let url = self.resolve(url);
        tracing::debug!("GET {} (text)", url);

        let response = self
            .client()?
            .get(&url)
            .send()
            .await
            .map_err(HttpFailure::transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpFailure {
                status: Some(status.as_u16()),
                message: status.canonical_reason().unwrap_or("error").to_string(),
            });
        }
        response.text().await.map_err(HttpFailure::transport)
    }
}

impl Default for HttpService {
    fn default() -> Self {
        Self::new()
    }
}
