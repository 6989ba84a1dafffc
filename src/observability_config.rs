//! # Observability Configuration
//!
//! Environment-specific settings for logging and metrics.

use crate::errors::{AppError, AppResult};
use std::env;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" => Some(LogFormat::Pretty),
            _ => None,
        }
    }
}

/// Observability configuration for different environments
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Environment name (development, staging, production)
    pub environment: String,
    /// Log level for the dishcovery crate
    pub log_level: String,
    /// Explicit log format; `None` picks pretty in development, JSON elsewhere
    pub log_format: Option<LogFormat>,
    /// Whether to install the Prometheus recorder
    pub enable_metrics_export: bool,
    /// Additional tags attached to the startup log
    pub tags: Vec<(String, String)>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_format: None,
            enable_metrics_export: true,
            tags: Vec::new(),
        }
    }
}

impl ObservabilityConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT").ok().and_then(|v| LogFormat::parse(&v)),
            enable_metrics_export: env::var("ENABLE_METRICS_EXPORT")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            tags: env::var("OBSERVABILITY_TAGS")
                .map(|raw| parse_tags(&raw))
                .unwrap_or_default(),
        };
        config.add_default_tags();
        config
    }

    fn add_default_tags(&mut self) {
        self.tags.push(("environment".to_string(), self.environment.clone()));
        self.tags.push(("service".to_string(), "dishcovery".to_string()));
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Format the subscriber should use
    pub fn effective_log_format(&self) -> LogFormat {
        match self.log_format {
            Some(format) => format,
            None if self.is_development() => LogFormat::Pretty,
            None => LogFormat::Json,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.environment.trim().is_empty() {
            return Err(AppError::Config("ENVIRONMENT cannot be empty".to_string()));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Invalid log level '{}', expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

/// Parse tags from environment variable string
/// Format: "key1=value1,key2=value2,key3=value3"
fn parse_tags(tags_str: &str) -> Vec<(String, String)> {
    tags_str
        .split(',')
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if !key.trim().is_empty() => {
                    Some((key.trim().to_string(), value.trim().to_string()))
                }
                _ => None,
            }
        })
        .collect()
}

/// Environment-specific configuration presets
pub mod presets {
    use super::{LogFormat, ObservabilityConfig};

    /// Development configuration with verbose pretty logs
    pub fn development() -> ObservabilityConfig {
        ObservabilityConfig {
            environment: "development".to_string(),
            log_level: "debug".to_string(),
            log_format: Some(LogFormat::Pretty),
            ..Default::default()
        }
    }

    /// Production configuration with JSON logs and fewer events
    pub fn production() -> ObservabilityConfig {
        ObservabilityConfig {
            environment: "production".to_string(),
            log_level: "warn".to_string(),
            log_format: Some(LogFormat::Json),
            ..Default::default()
        }
    }

    /// Minimal configuration for scripted use
    pub fn minimal() -> ObservabilityConfig {
        ObservabilityConfig {
            environment: "minimal".to_string(),
            log_level: "error".to_string(),
            enable_metrics_export: false,
            ..Default::default()
        }
    }
}
