//! # Dishcovery
//!
//! Ingredient resolution and recipe feasibility engine: turns freeform
//! ingredient text into canonical, categorized ingredients, decides whether
//! a set of ingredients makes a dish, rewrites it under dietary restrictions
//! and infers its probable cuisine.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod cuisine;
pub mod engine;
pub mod errors;
pub mod ingredient_set;
pub mod knowledge_base;
pub mod localization;
pub mod matcher;
pub mod observability;
pub mod observability_config;
pub mod restrictions;
pub mod similarity;
pub mod slots;
pub mod sufficiency;
pub mod suggestions;
pub mod text_processing;
pub mod validation;

// Re-export types for easier access
pub use engine::{Assessment, Engine};
pub use errors::{AppError, AppResult};
pub use ingredient_set::IngredientSet;
pub use knowledge_base::{Category, KnowledgeBase};
pub use matcher::MatchResult;
