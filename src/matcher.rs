//! # Ingredient Matcher
//!
//! Resolves freeform text to a canonical catalog ingredient.
//!
//! 1. Normalize; empty text is rejected
//! 2. An exact catalog name wins outright
//! 3. Otherwise every catalog name is scored with the configured
//!    [`Similarity`] and the best one is classified against two fixed
//!    thresholds: accepted at [`ACCEPT_THRESHOLD`], suggested at
//!    [`SUGGEST_THRESHOLD`], rejected below
//!
//! A best score shared by several distinct names is ambiguous: at the
//! acceptance level it is downgraded to a suggestion for the first of them
//! in catalog order (lexicographic), so a tie never auto-accepts.

use crate::knowledge_base::Catalog;
use crate::similarity::Similarity;
use crate::text_processing::normalize;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Minimum score for a fuzzy match to be accepted as the canonical ingredient
pub const ACCEPT_THRESHOLD: f64 = 90.0;

/// Minimum score for a fuzzy match to be offered as a "did you mean" hint
pub const SUGGEST_THRESHOLD: f64 = 75.0;

/// Outcome of resolving one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchResult {
    Exact { canonical: String },
    FuzzyAccepted { canonical: String, score: f64 },
    FuzzySuggested { suggestion: String, score: f64 },
    Rejected,
}

impl MatchResult {
    /// Canonical ingredient the query stands for, when accepted
    pub fn canonical(&self) -> Option<&str> {
        match self {
            MatchResult::Exact { canonical } | MatchResult::FuzzyAccepted { canonical, .. } => {
                Some(canonical)
            }
            _ => None,
        }
    }

    /// "Did you mean" hint, present only for [`MatchResult::FuzzySuggested`]
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            MatchResult::FuzzySuggested { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.canonical().is_some()
    }

    /// Similarity score; 100 for exact matches, absent when rejected
    pub fn score(&self) -> Option<f64> {
        match self {
            MatchResult::Exact { .. } => Some(100.0),
            MatchResult::FuzzyAccepted { score, .. } | MatchResult::FuzzySuggested { score, .. } => {
                Some(*score)
            }
            MatchResult::Rejected => None,
        }
    }

    /// Stable label used for logs and metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            MatchResult::Exact { .. } => "exact",
            MatchResult::FuzzyAccepted { .. } => "fuzzy_accepted",
            MatchResult::FuzzySuggested { .. } => "fuzzy_suggested",
            MatchResult::Rejected => "rejected",
        }
    }
}

/// Scores equal within this margin count as a tie
const TIE_EPSILON: f64 = 1e-9;

/// Every catalog name sharing the best score for an already-normalized
/// query, in catalog order
pub fn top_candidates<'a>(
    query: &str,
    catalog: &'a Catalog,
    scorer: &dyn Similarity,
) -> Vec<(&'a str, f64)> {
    let mut top: Vec<(&str, f64)> = Vec::new();

    for name in catalog.names() {
        let score = scorer.similarity(query, name);
        trace!(query = %query, candidate = %name, score, "Scored candidate");
        match top.first().map(|(_, best)| *best) {
            Some(best) if score < best - TIE_EPSILON => {}
            Some(best) if score <= best + TIE_EPSILON => top.push((name, score)),
            _ => {
                top.clear();
                top.push((name, score));
            }
        }
    }

    top
}

/// Highest scoring catalog name for an already-normalized query
pub fn best_match<'a>(
    query: &str,
    catalog: &'a Catalog,
    scorer: &dyn Similarity,
) -> Option<(&'a str, f64)> {
    top_candidates(query, catalog, scorer).into_iter().next()
}

/// Resolve raw ingredient text against the catalog.
///
/// Never fails: unknown text is a normal [`MatchResult::Rejected`].
pub fn resolve(query: &str, catalog: &Catalog, scorer: &dyn Similarity) -> MatchResult {
    let normalized = normalize(query);
    if normalized.is_empty() {
        return MatchResult::Rejected;
    }

    if catalog.contains(&normalized) {
        debug!(query = %normalized, "Exact catalog match");
        return MatchResult::Exact {
            canonical: normalized,
        };
    }

    let top = top_candidates(&normalized, catalog, scorer);
    let tied = top.len() > 1;
    let result = match top.first().copied() {
        Some((name, score)) if score >= ACCEPT_THRESHOLD && tied => {
            debug!(
                query = %normalized,
                candidates = ?top,
                "Ambiguous acceptance downgraded to a suggestion"
            );
            MatchResult::FuzzySuggested {
                suggestion: name.to_string(),
                score,
            }
        }
        Some((name, score)) if score >= ACCEPT_THRESHOLD => MatchResult::FuzzyAccepted {
            canonical: name.to_string(),
            score,
        },
        Some((name, score)) if score >= SUGGEST_THRESHOLD => MatchResult::FuzzySuggested {
            suggestion: name.to_string(),
            score,
        },
        _ => MatchResult::Rejected,
    };

    debug!(
        query = %normalized,
        scorer = scorer.name(),
        outcome = result.outcome(),
        score = ?result.score(),
        "Fuzzy resolution"
    );
    result
}

/// Pairs of distinct catalog names that score at or above the acceptance
/// threshold against each other. A query scoring the same against both is
/// only ever suggested by [`resolve`].
pub fn ambiguous_pairs(catalog: &Catalog, scorer: &dyn Similarity) -> Vec<(String, String, f64)> {
    let names: Vec<&str> = catalog.names().collect();
    let mut pairs = Vec::new();

    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            let score = scorer.similarity(a, b);
            if score >= ACCEPT_THRESHOLD {
                pairs.push((a.to_string(), b.to_string(), score));
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge_base::KnowledgeBase;
    use crate::similarity::WeightedRatio;

    fn catalog() -> Catalog {
        KnowledgeBase::builtin().unwrap().catalog().clone()
    }

    #[test]
    fn test_exact_after_normalization() {
        let result = resolve("  Garam   MASALA ", &catalog(), &WeightedRatio);
        assert_eq!(
            result,
            MatchResult::Exact {
                canonical: "garam masala".to_string()
            }
        );
        assert_eq!(result.score(), Some(100.0));
    }

    #[test]
    fn test_empty_is_rejected() {
        assert_eq!(resolve("   ", &catalog(), &WeightedRatio), MatchResult::Rejected);
    }

    #[test]
    fn test_suggestion_accessor() {
        let result = resolve("tofuu", &catalog(), &WeightedRatio);
        assert_eq!(result.suggestion(), Some("tofu"));
        assert!(!result.is_accepted());
        assert_eq!(MatchResult::Rejected.suggestion(), None);
    }

    #[test]
    fn test_best_match_on_empty_catalog() {
        assert!(best_match("rice", &Catalog::default(), &WeightedRatio).is_none());
        assert_eq!(resolve("rice", &Catalog::default(), &WeightedRatio), MatchResult::Rejected);
    }

    #[test]
    fn test_tied_top_candidates_are_all_reported() {
        let catalog = catalog();
        let top = top_candidates("sauce", &catalog, &WeightedRatio);
        let names: Vec<&str> = top.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["fish sauce", "mushroom sauce", "oyster sauce"]);
        assert_eq!(
            best_match("sauce", &catalog, &WeightedRatio).map(|(name, _)| name),
            Some("fish sauce")
        );
    }

    #[test]
    fn test_match_result_serializes_with_kind_tag() {
        let json = serde_json::to_value(MatchResult::Rejected).unwrap();
        assert_eq!(json["kind"], "rejected");
    }
}
