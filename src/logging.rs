//! # Logging
//!
//! Tracing subscriber setup for the `corona` binary and for hosts that want
//! the framework's diagnostics on stderr.

use crate::config::LOG_LEVEL_ENV_VAR;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

/// Crates whose chatter is capped at `warn` regardless of the configured level
const QUIET_TARGETS: &[&str] = &[
    "reqwest", "hyper", "hyper_util", "tokio", "tower", "rustls", "h2",
];

fn env_filter() -> EnvFilter {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_LEVEL_ENV_VAR)
        .from_env_lossy();

    for target in QUIET_TARGETS {
        if let Ok(directive) = format!("{target}=warn").parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Install the stderr fmt subscriber; later calls are no-ops
pub fn init_tracing_subscriber() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init();

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed.");
    }
}
