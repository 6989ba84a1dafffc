//! # Restriction Engine
//!
//! Rewrites an ingredient set under active dietary restrictions.
//!
//! For every forbidden ingredient the active restrictions are scanned in the
//! caller's order. The first one with a substitution whose replacement is
//! allowed under *every* active restriction wins; without such a rule the
//! ingredient is removed. Because replacements are always fully compliant,
//! applying the same restrictions twice changes nothing the second time.

use crate::ingredient_set::IngredientSet;
use crate::knowledge_base::{KnowledgeBase, RestrictionRule};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One entry of the change log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    Replaced {
        original: String,
        replacement: String,
        /// Active restrictions that forbid `original`
        triggered_by: Vec<String>,
        /// Restriction whose substitution rule was used
        via: String,
    },
    Removed {
        original: String,
        triggered_by: Vec<String>,
    },
}

impl Change {
    pub fn original(&self) -> &str {
        match self {
            Change::Replaced { original, .. } | Change::Removed { original, .. } => original,
        }
    }

    pub fn triggered_by(&self) -> &[String] {
        match self {
            Change::Replaced { triggered_by, .. } | Change::Removed { triggered_by, .. } => {
                triggered_by
            }
        }
    }

    /// Stable label used for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Change::Replaced { .. } => "replaced",
            Change::Removed { .. } => "removed",
        }
    }
}

/// Adjusted ingredient set plus the changes that produced it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionOutcome {
    pub adjusted: IngredientSet,
    pub changes: Vec<Change>,
}

impl RestrictionOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Resolve restriction names to rules, skipping unknown and repeated names
fn active_rules<'kb, S: AsRef<str>>(
    active: &[S],
    kb: &'kb KnowledgeBase,
) -> Vec<&'kb RestrictionRule> {
    let mut rules: Vec<&RestrictionRule> = Vec::new();
    for name in active {
        let name = name.as_ref();
        match kb.restriction(name) {
            Some(rule) if rules.iter().any(|r| r.name == rule.name) => {}
            Some(rule) => rules.push(rule),
            None => warn!(restriction = %name, "Ignoring unknown dietary restriction"),
        }
    }
    rules
}

/// Apply active restrictions to an ingredient set.
///
/// ```
/// use dishcovery::ingredient_set::IngredientSet;
/// use dishcovery::knowledge_base::KnowledgeBase;
/// use dishcovery::restrictions::apply;
///
/// let kb = KnowledgeBase::builtin().unwrap();
/// let set: IngredientSet = ["butter", "chicken"].into_iter().collect();
/// let outcome = apply(&set, &["vegan"], &kb);
/// assert_eq!(outcome.adjusted.as_slice(), ["olive oil", "tofu"]);
/// assert_eq!(outcome.changes.len(), 2);
/// ```
pub fn apply<S: AsRef<str>>(
    ingredients: &IngredientSet,
    active: &[S],
    kb: &KnowledgeBase,
) -> RestrictionOutcome {
    let rules = active_rules(active, kb);
    if rules.is_empty() {
        return RestrictionOutcome {
            adjusted: ingredients.clone(),
            changes: Vec::new(),
        };
    }

    let allowed = |name: &str| rules.iter().all(|rule| !rule.forbid.contains(name));
    let mut outcome = RestrictionOutcome::default();

    for ingredient in ingredients.iter() {
        let triggered_by: Vec<String> = rules
            .iter()
            .filter(|rule| rule.forbid.contains(ingredient))
            .map(|rule| rule.name.clone())
            .collect();

        if triggered_by.is_empty() {
            outcome.adjusted.push(ingredient);
            continue;
        }

        let substitution = rules.iter().find_map(|rule| {
            kb.substitution(ingredient, &rule.name)
                .filter(|&replacement| allowed(replacement))
                .map(|replacement| (replacement, rule.name.as_str()))
        });

        let change = match substitution {
            Some((replacement, via)) => {
                outcome.adjusted.push(replacement);
                Change::Replaced {
                    original: ingredient.to_string(),
                    replacement: replacement.to_string(),
                    triggered_by,
                    via: via.to_string(),
                }
            }
            None => Change::Removed {
                original: ingredient.to_string(),
                triggered_by,
            },
        };
        debug!(change = ?change, "Restriction applied");
        outcome.changes.push(change);
    }

    outcome
}
