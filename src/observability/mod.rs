//! # Observability Infrastructure
//!
//! Structured logging and metrics for the Learngate auth service.

pub mod metrics;

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging from the observability configuration.
///
/// Honors `RUST_LOG` when set, otherwise falls back to the configured log
/// level. Safe to call once per process; a second call returns an error from
/// the subscriber registration, which is surfaced as a configuration error.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = if config.json_logging {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| Error::config(format!("Failed to initialize tracing: {}", e)))
}
