//! # Unified Application Configuration
//!
//! Consolidates engine, observability and CLI settings into one structured
//! object loaded from environment variables and validated before use.

use crate::cuisine::DEFAULT_CONFIDENCE_THRESHOLD;
use crate::errors::{AppError, AppResult};
use crate::observability_config::ObservabilityConfig;
use crate::similarity::ScorerKind;
use crate::sufficiency::DEFAULT_MIN_INGREDIENTS;
use serde::{Deserialize, Serialize};
use std::env;

/// Languages the CLI ships message bundles for
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["en", "fr"];

/// Engine configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Explicit knowledge base file; fallback paths are searched when unset
    pub knowledge_base_path: Option<String>,
    /// Minimum winning score for a confident cuisine inference
    pub confidence_threshold: u32,
    /// Similarity scorer used by the matcher
    pub scorer: ScorerKind,
    /// Distinct ingredients a covered set needs before it is ready
    pub min_ingredients: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            knowledge_base_path: None,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            scorer: ScorerKind::default(),
            min_ingredients: DEFAULT_MIN_INGREDIENTS,
        }
    }
}

impl EngineConfig {
    /// Validate engine configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.confidence_threshold == 0 {
            return Err(AppError::Config(
                "CUISINE_CONFIDENCE_THRESHOLD must be at least 1".to_string(),
            ));
        }

        if self.min_ingredients == 0 {
            return Err(AppError::Config(
                "MIN_INGREDIENTS must be at least 1".to_string(),
            ));
        }

        if let Some(path) = &self.knowledge_base_path {
            if path.trim().is_empty() {
                return Err(AppError::Config(
                    "KNOWLEDGE_BASE_PATH cannot be empty when set".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Command line front end settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Language used when `--lang` is not given
    pub default_language: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
        }
    }
}

impl CliConfig {
    pub fn validate(&self) -> AppResult<()> {
        if !SUPPORTED_LANGUAGES.contains(&self.default_language.as_str()) {
            return Err(AppError::Config(format!(
                "DISHCOVERY_LANGUAGE '{}' is not supported (expected one of {})",
                self.default_language,
                SUPPORTED_LANGUAGES.join(", ")
            )));
        }
        Ok(())
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub observability: ObservabilityConfig,
    pub cli: CliConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        config.engine.knowledge_base_path = env::var("KNOWLEDGE_BASE_PATH").ok();
        config.engine.confidence_threshold = env::var("CUISINE_CONFIDENCE_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_CONFIDENCE_THRESHOLD.to_string())
            .parse()
            .map_err(|_| {
                AppError::Config(
                    "CUISINE_CONFIDENCE_THRESHOLD must be a valid positive number".to_string(),
                )
            })?;
        if let Ok(min) = env::var("MIN_INGREDIENTS") {
            config.engine.min_ingredients = min.trim().parse().map_err(|_| {
                AppError::Config("MIN_INGREDIENTS must be a valid positive number".to_string())
            })?;
        }
        if let Ok(scorer) = env::var("SIMILARITY_SCORER") {
            config.engine.scorer = scorer.parse().map_err(AppError::Config)?;
        }

        config.observability = ObservabilityConfig::from_env();

        if let Ok(language) = env::var("DISHCOVERY_LANGUAGE") {
            config.cli.default_language = language.trim().to_lowercase();
        }

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> AppResult<()> {
        self.engine.validate()?;
        self.observability.validate()?;
        self.cli.validate()?;
        Ok(())
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: knowledge_base={}, confidence_threshold={}, min_ingredients={}, scorer={}, environment={}, language={}",
            self.engine
                .knowledge_base_path
                .as_deref()
                .unwrap_or("<search>"),
            self.engine.confidence_threshold,
            self.engine.min_ingredients,
            self.engine.scorer,
            self.observability.environment,
            self.cli.default_language
        )
    }
}
