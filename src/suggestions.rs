//! Suggestion generation
//!
//! Turns bad-combination and missing-clause signals into an ordered list of
//! ingredients worth adding. Bad-combo remedies come first, in table order,
//! followed by clause remedies in the order the clauses are missing.

use crate::ingredient_set::IngredientSet;
use crate::knowledge_base::{BadCombo, SufficiencyPolicy};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Bad combinations fully contained in the current ingredients, in table order
pub fn detect_bad_combos<'a>(
    current: &IngredientSet,
    bad_combos: &'a [BadCombo],
) -> Vec<&'a BadCombo> {
    let present = current.lookup();
    bad_combos
        .iter()
        .filter(|combo| combo.is_contained_in(&present))
        .collect()
}

/// Ordered, deduplicated ingredients to add.
///
/// `missing` holds clause keys as reported by the sufficiency evaluator.
/// Remedies already present in `current` are still listed; the caller
/// decides how to present them.
pub fn suggest<S: AsRef<str>>(
    missing: &[S],
    policy: &SufficiencyPolicy,
    bad_combos: &[BadCombo],
    current: &IngredientSet,
) -> Vec<String> {
    let combo_remedies = detect_bad_combos(current, bad_combos)
        .into_iter()
        .flat_map(|combo| combo.remedies.iter());

    let clause_remedies = missing.iter().flat_map(|key| {
        let key = key.as_ref();
        let clause = policy.clause(key);
        if clause.is_none() {
            warn!(clause = %key, "Missing clause is not part of the policy");
        }
        clause.into_iter().flat_map(|clause| clause.remedies.iter())
    });

    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();
    for remedy in combo_remedies.chain(clause_remedies) {
        if seen.insert(remedy.as_str()) {
            suggestions.push(remedy.clone());
        }
    }

    debug!(suggestions = ?suggestions, "Suggestions generated");
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge_base::KnowledgeBase;

    #[test]
    fn test_bad_combo_detection() {
        let kb = KnowledgeBase::builtin().unwrap();
        let set: IngredientSet = ["rice", "milk", "tuna"].into_iter().collect();
        let combos = detect_bad_combos(&set, kb.bad_combos());
        assert_eq!(combos.len(), 2);
        assert!(combos[0].ingredients.contains("rice"));
        assert!(combos[1].ingredients.contains("tuna"));
    }

    #[test]
    fn test_combo_remedies_come_first_and_dedupe() {
        let kb = KnowledgeBase::builtin().unwrap();
        let set: IngredientSet = ["milk", "pasta"].into_iter().collect();
        let suggestions = suggest(
            &["aromatic_or_veg", "flavor"],
            kb.policy(),
            kb.bad_combos(),
            &set,
        );
        assert_eq!(
            suggestions,
            vec![
                "olive oil",
                "garlic",
                "parmesan",
                "pepper",
                "onion",
                "salt",
                "soy sauce",
                "tomato paste"
            ]
        );
    }

    #[test]
    fn test_nothing_to_suggest() {
        let kb = KnowledgeBase::builtin().unwrap();
        let set: IngredientSet = ["garlic"].into_iter().collect();
        assert!(suggest::<&str>(&[], kb.policy(), kb.bad_combos(), &set).is_empty());
    }
}
