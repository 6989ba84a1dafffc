//! Sufficiency evaluation
//!
//! Decides whether an ingredient set covers enough functional roles to make
//! a dish. Each policy clause counts the ingredients tagged with any of its
//! categories; an ingredient counts toward every clause it matches, and
//! duplicates count once per occurrence.

use crate::classifier::category_counts;
use crate::ingredient_set::IngredientSet;
use crate::knowledge_base::{Catalog, Category, SufficiencyPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Distinct ingredients a covered set needs before it is worth acting on
pub const DEFAULT_MIN_INGREDIENTS: usize = 3;

/// Coverage of a single policy clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseStatus {
    pub key: String,
    pub required: usize,
    pub found: usize,
}

impl ClauseStatus {
    pub fn is_met(&self) -> bool {
        self.found >= self.required
    }

    /// How many more matching ingredients the clause needs
    pub fn shortfall(&self) -> usize {
        self.required.saturating_sub(self.found)
    }
}

/// Result of [`evaluate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SufficiencyReport {
    pub sufficient: bool,
    /// Unmet clause keys, in policy order
    pub missing: Vec<String>,
    pub clauses: Vec<ClauseStatus>,
    pub category_counts: BTreeMap<Category, usize>,
}

/// Evaluate an ingredient set against the policy.
///
/// ```
/// use dishcovery::ingredient_set::IngredientSet;
/// use dishcovery::knowledge_base::KnowledgeBase;
/// use dishcovery::sufficiency::evaluate;
///
/// let kb = KnowledgeBase::builtin().unwrap();
/// let set: IngredientSet = ["chicken"].into_iter().collect();
/// let report = evaluate(&set, kb.catalog(), kb.policy());
/// assert!(!report.sufficient);
/// assert_eq!(report.missing, vec!["aromatic_or_veg", "flavor", "liquid_or_fat"]);
/// ```
pub fn evaluate(
    ingredients: &IngredientSet,
    catalog: &Catalog,
    policy: &SufficiencyPolicy,
) -> SufficiencyReport {
    let tags: Vec<_> = ingredients
        .iter()
        .map(|ing| catalog.categories_of(ing))
        .collect();

    let clauses: Vec<ClauseStatus> = policy
        .clauses
        .iter()
        .map(|clause| ClauseStatus {
            key: clause.key.clone(),
            required: clause.min_count,
            found: tags.iter().filter(|cats| clause.matches(cats)).count(),
        })
        .collect();

    let missing: Vec<String> = clauses
        .iter()
        .filter(|status| !status.is_met())
        .map(|status| status.key.clone())
        .collect();

    let report = SufficiencyReport {
        sufficient: missing.is_empty(),
        missing,
        clauses,
        category_counts: category_counts(ingredients, catalog),
    };

    debug!(
        ingredients = ingredients.len(),
        sufficient = report.sufficient,
        missing = ?report.missing,
        "Sufficiency evaluated"
    );
    report
}

/// A sufficient set that also holds at least `min_ingredients` distinct
/// ingredients. Covering every clause with one or two multi-role ingredients
/// is not a dish yet.
pub fn is_ready(
    report: &SufficiencyReport,
    ingredients: &IngredientSet,
    min_ingredients: usize,
) -> bool {
    report.sufficient && ingredients.distinct().len() >= min_ingredients
}
