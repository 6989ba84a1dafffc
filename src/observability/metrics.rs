//! Metrics collection module.
//!
//! Recording goes through the `metrics` facade and is a no-op until a
//! recorder is installed by [`init_metrics_with_config`].

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::observability_config::ObservabilityConfig;

/// Install the Prometheus recorder when metrics export is enabled
pub fn init_metrics_with_config(config: &ObservabilityConfig) -> Result<Option<PrometheusHandle>> {
    if !config.enable_metrics_export {
        tracing::info!("Metrics export disabled");
        return Ok(None);
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    tracing::info!(
        metrics_enabled = %config.enable_metrics_export,
        "Metrics collection initialized"
    );
    Ok(Some(handle))
}

/// Record one ingredient resolution
pub fn record_resolution(outcome: &'static str, score: Option<f64>) {
    metrics::counter!("ingredient_resolutions_total", "outcome" => outcome).increment(1);
    if let Some(score) = score {
        metrics::histogram!("ingredient_similarity_score").record(score);
    }
}

/// Record one restriction change ("replaced" or "removed")
pub fn record_restriction_change(kind: &'static str) {
    metrics::counter!("restriction_changes_total", "kind" => kind).increment(1);
}

/// Record one cuisine inference
pub fn record_cuisine_inference(confident: bool) {
    metrics::counter!(
        "cuisine_inferences_total",
        "confident" => if confident { "true" } else { "false" }
    )
    .increment(1);
}

/// Record one sufficiency evaluation
pub fn record_sufficiency_evaluation(sufficient: bool) {
    metrics::counter!(
        "sufficiency_evaluations_total",
        "sufficient" => if sufficient { "true" } else { "false" }
    )
    .increment(1);
}

/// Record error metrics
pub fn record_error_metrics(error_type: &str, component: &str) {
    let error_type = error_type.to_string();
    let component = component.to_string();
    metrics::counter!("errors_total", "type" => error_type, "component" => component).increment(1);
}

/// Record application startup metrics
pub fn record_startup_metrics(duration: std::time::Duration) {
    metrics::histogram!("application_startup_duration_seconds").record(duration.as_secs_f64());
    metrics::counter!("application_starts_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability_config::presets;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_resolution("exact", Some(100.0));
        record_restriction_change("replaced");
        record_cuisine_inference(true);
        record_sufficiency_evaluation(false);
        record_error_metrics("config", "startup");
    }

    #[test]
    fn test_disabled_export_installs_nothing() {
        let handle = init_metrics_with_config(&presets::minimal()).unwrap();
        assert!(handle.is_none());
    }
}
