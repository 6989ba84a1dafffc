//! Tracing and logging setup module.

use anyhow::Result;
use tracing_subscriber::prelude::*;

use crate::observability_config::{LogFormat, ObservabilityConfig};

/// Initialize structured logging with tracing and configuration.
///
/// Logs go to stderr so command output on stdout stays clean. Calling this
/// twice is an error from the subscriber registry.
pub fn init_tracing_with_config(config: &ObservabilityConfig) -> Result<()> {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("dishcovery={}", config.log_level.to_lowercase()).parse()?);

    if let Ok(obs_log) = std::env::var("OBSERVABILITY_LOG_LEVEL") {
        filter = filter.add_directive(format!("dishcovery::observability={}", obs_log).parse()?);
    }

    match config.effective_log_format() {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_thread_names(false),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_thread_names(true),
                )
                .try_init()?;
        }
    }

    tracing::info!(
        environment = %config.environment,
        log_level = %config.log_level,
        "Tracing initialized with structured logging"
    );
    Ok(())
}

/// Create a span for engine operations
pub fn engine_span(operation: &str) -> tracing::Span {
    tracing::info_span!("engine_operation", operation = operation, component = "engine")
}
