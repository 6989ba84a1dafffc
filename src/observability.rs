//! Observability module for centralized metrics, tracing, and logging setup.
//!
//! This module provides:
//! - Structured logging with configurable levels and formats
//! - Metrics collection rendered in Prometheus text format
//! - Span helpers for engine operations

pub mod metrics;
pub mod tracing_mod;

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::observability_config::ObservabilityConfig;

pub use self::metrics::{
    init_metrics_with_config, record_cuisine_inference, record_error_metrics, record_resolution,
    record_restriction_change, record_startup_metrics, record_sufficiency_evaluation,
};
pub use self::tracing_mod::{engine_span, init_tracing_with_config};

/// Initialize logging and metrics with custom configuration.
///
/// Returns the Prometheus handle when metrics export is enabled.
pub fn init_observability_with_config(
    config: ObservabilityConfig,
) -> Result<Option<PrometheusHandle>> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid observability configuration: {}", e))?;

    init_tracing_with_config(&config)?;
    let handle = init_metrics_with_config(&config)?;

    tracing::info!(
        environment = %config.environment,
        metrics_export = %config.enable_metrics_export,
        tags = ?config.tags,
        "Observability stack initialized successfully"
    );
    Ok(handle)
}
