//! # Engine
//!
//! Facade over the knowledge base, the similarity scorer and the cuisine
//! confidence threshold. Every operation is synchronous and side-effect free
//! apart from logging and metrics, so one engine can be shared across
//! threads behind an `Arc`.

use crate::config::EngineConfig;
use crate::cuisine::{self, CuisineInference, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::errors::{error_logging, AppError, AppResult};
use crate::ingredient_set::IngredientSet;
use crate::knowledge_base::{load_knowledge_base, BadCombo, Category, KnowledgeBase};
use crate::matcher::{self, MatchResult};
use crate::observability;
use crate::restrictions::{self, Change, RestrictionOutcome};
use crate::similarity::{ScorerKind, Similarity};
use crate::slots::{self, SlotPass};
use crate::suggestions;
use crate::sufficiency::{self, SufficiencyReport, DEFAULT_MIN_INGREDIENTS};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Everything the engine can say about a session's ingredients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub restrictions: RestrictionOutcome,
    pub sufficiency: SufficiencyReport,
    /// Bad combinations found in the adjusted set
    pub bad_combos: Vec<BadCombo>,
    pub suggestions: Vec<String>,
    pub cuisine: CuisineInference,
    /// Restrictions removed every ingredient
    pub all_restricted: bool,
    /// Sufficient and at least `min_ingredients` distinct ingredients
    pub ready: bool,
    pub min_ingredients: usize,
}

impl Assessment {
    /// Ingredients the rest of the assessment was computed on
    pub fn ingredients(&self) -> &IngredientSet {
        &self.restrictions.adjusted
    }
}

pub struct Engine {
    kb: KnowledgeBase,
    scorer: Box<dyn Similarity>,
    confidence_threshold: u32,
    min_ingredients: usize,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("catalog_size", &self.kb.catalog().len())
            .field("scorer", &self.scorer.name())
            .field("confidence_threshold", &self.confidence_threshold)
            .field("min_ingredients", &self.min_ingredients)
            .finish()
    }
}

impl Engine {
    /// Build an engine over an already validated knowledge base.
    ///
    /// Catalog names close enough to auto-accept each other are reported as
    /// a warning; a query tying between them is only ever suggested.
    pub fn new(
        kb: KnowledgeBase,
        scorer: Box<dyn Similarity>,
        confidence_threshold: u32,
    ) -> AppResult<Self> {
        if confidence_threshold == 0 {
            let err = AppError::Config("confidence threshold must be at least 1".to_string());
            error_logging::log_config_error(&err, "CUISINE_CONFIDENCE_THRESHOLD", "engine_new");
            return Err(err);
        }

        let ambiguous = matcher::ambiguous_pairs(kb.catalog(), scorer.as_ref());
        if !ambiguous.is_empty() {
            warn!(
                scorer = scorer.name(),
                count = ambiguous.len(),
                pairs = ?ambiguous,
                "Catalog names within fuzzy-acceptance distance of each other"
            );
        }

        info!(
            catalog_size = kb.catalog().len(),
            scorer = scorer.name(),
            confidence_threshold,
            "Engine ready"
        );

        Ok(Self {
            kb,
            scorer,
            confidence_threshold,
            min_ingredients: DEFAULT_MIN_INGREDIENTS,
        })
    }

    /// Distinct ingredients an assessment needs to be ready, at least 1
    pub fn with_min_ingredients(mut self, min_ingredients: usize) -> Self {
        self.min_ingredients = min_ingredients.max(1);
        self
    }

    /// Load the knowledge base and scorer named by the configuration
    pub fn from_config(config: &EngineConfig) -> AppResult<Self> {
        config.validate()?;
        let kb = load_knowledge_base(config.knowledge_base_path.as_deref())?;
        Ok(Self::new(kb, config.scorer.build(), config.confidence_threshold)?
            .with_min_ingredients(config.min_ingredients))
    }

    /// Built-in knowledge base, default scorer and threshold
    pub fn with_defaults() -> AppResult<Self> {
        Self::new(
            KnowledgeBase::builtin()?,
            ScorerKind::default().build(),
            DEFAULT_CONFIDENCE_THRESHOLD,
        )
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn confidence_threshold(&self) -> u32 {
        self.confidence_threshold
    }

    pub fn min_ingredients(&self) -> usize {
        self.min_ingredients
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    /// Resolve raw ingredient text to a canonical ingredient
    pub fn resolve(&self, query: &str) -> MatchResult {
        let result = matcher::resolve(query, self.kb.catalog(), self.scorer.as_ref());
        observability::record_resolution(result.outcome(), result.score());
        result
    }

    pub fn categories_of(&self, canonical: &str) -> BTreeSet<Category> {
        crate::classifier::categories_of(canonical, self.kb.catalog())
    }

    /// Evaluate the ingredient set against the sufficiency policy
    pub fn evaluate(&self, ingredients: &IngredientSet) -> SufficiencyReport {
        let report = sufficiency::evaluate(ingredients, self.kb.catalog(), self.kb.policy());
        observability::record_sufficiency_evaluation(report.sufficient);
        report
    }

    /// Rewrite the ingredient set under the active restrictions, in priority order
    pub fn apply_restrictions<S: AsRef<str>>(
        &self,
        ingredients: &IngredientSet,
        active: &[S],
    ) -> RestrictionOutcome {
        let outcome = restrictions::apply(ingredients, active, &self.kb);
        for change in &outcome.changes {
            observability::record_restriction_change(change.kind());
        }
        outcome
    }

    pub fn infer_cuisine(&self, ingredients: &IngredientSet) -> CuisineInference {
        let inference = cuisine::infer(ingredients, self.kb.cuisines(), self.confidence_threshold);
        observability::record_cuisine_inference(inference.confident);
        inference
    }

    pub fn detect_bad_combos(&self, ingredients: &IngredientSet) -> Vec<&BadCombo> {
        suggestions::detect_bad_combos(ingredients, self.kb.bad_combos())
    }

    /// Ordered ingredients to add, given the missing clause keys
    pub fn suggest<S: AsRef<str>>(&self, missing: &[S], current: &IngredientSet) -> Vec<String> {
        suggestions::suggest(missing, self.kb.policy(), self.kb.bad_combos(), current)
    }

    /// One slot pass with this engine as the resolver
    pub fn evaluate_slots<S: AsRef<str>>(&self, texts: &[S]) -> SlotPass {
        slots::evaluate_slots(texts, &|text: &str| self.resolve(text))
    }

    /// Restrictions first, then every other analysis on the adjusted set
    pub fn assess<S: AsRef<str>>(&self, ingredients: &IngredientSet, active: &[S]) -> Assessment {
        let _span = observability::engine_span("assess").entered();

        let restrictions = self.apply_restrictions(ingredients, active);
        let adjusted = &restrictions.adjusted;

        let sufficiency = self.evaluate(adjusted);
        let bad_combos: Vec<BadCombo> = self
            .detect_bad_combos(adjusted)
            .into_iter()
            .cloned()
            .collect();
        let suggestions = self.suggest(&sufficiency.missing, adjusted);
        let cuisine = self.infer_cuisine(adjusted);
        let all_restricted = !ingredients.is_empty() && adjusted.is_empty();
        let ready = sufficiency::is_ready(&sufficiency, adjusted, self.min_ingredients);

        if all_restricted {
            warn!(
                removed = restrictions.changes.len(),
                "Restrictions removed every ingredient"
            );
        }

        Assessment {
            all_restricted,
            ready,
            min_ingredients: self.min_ingredients,
            sufficiency,
            bad_combos,
            suggestions,
            cuisine,
            restrictions,
        }
    }
}

/// Restriction names a change log mentions, for display
pub fn triggering_restrictions(changes: &[Change]) -> BTreeSet<&str> {
    changes
        .iter()
        .flat_map(|change| change.triggered_by().iter().map(String::as_str))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_threshold_is_rejected() {
        let kb = KnowledgeBase::builtin().unwrap();
        let err = Engine::new(kb, ScorerKind::WeightedRatio.build(), 0).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_assess_runs_restrictions_first() {
        let engine = Engine::with_defaults().unwrap();
        let set: IngredientSet = ["chicken", "milk", "rice"].into_iter().collect();
        let assessment = engine.assess(&set, &["vegan"]);

        assert_eq!(assessment.ingredients().as_slice(), ["tofu", "oat milk", "rice"]);
        // milk is gone, so the milk + rice combo no longer applies
        assert!(assessment.bad_combos.is_empty());
        assert!(!assessment.all_restricted);
        assert_eq!(assessment.sufficiency.missing, vec!["aromatic_or_veg", "flavor"]);
    }

    #[test]
    fn test_all_restricted() {
        let engine = Engine::with_defaults().unwrap();
        let set: IngredientSet = ["pasta", "bread"].into_iter().collect();
        let assessment = engine.assess(&set, &["gluten_free"]);
        assert!(assessment.all_restricted);
        assert_eq!(assessment.cuisine.cuisine, None);
        assert_eq!(triggering_restrictions(&assessment.restrictions.changes).len(), 1);
    }

    #[test]
    fn test_ready_needs_distinct_ingredients() {
        let set: IngredientSet = ["garlic", "rice", "salt", "olive oil"].into_iter().collect();

        let engine = Engine::with_defaults().unwrap();
        let assessment = engine.assess::<&str>(&set, &[]);
        assert!(assessment.sufficiency.sufficient);
        assert!(assessment.ready);

        let strict = Engine::with_defaults().unwrap().with_min_ingredients(5);
        let assessment = strict.assess::<&str>(&set, &[]);
        assert!(assessment.sufficiency.sufficient);
        assert!(!assessment.ready);
        assert_eq!(assessment.min_ingredients, 5);
    }

    #[test]
    fn test_engine_slots_use_catalog() {
        let engine = Engine::with_defaults().unwrap();
        let pass = engine.evaluate_slots(&["Tomatoe"]);
        assert!(pass.appended);
        assert_eq!(pass.ingredients().as_slice(), ["tomato"]);
    }

    #[test]
    fn test_jaro_winkler_engine() {
        let kb = KnowledgeBase::builtin().unwrap();
        let engine = Engine::new(kb, ScorerKind::JaroWinkler.build(), 3).unwrap();
        assert_eq!(engine.scorer_name(), "jaro_winkler");
        assert_eq!(engine.resolve("garlic").canonical(), Some("garlic"));
    }
}
