//! # Matcher Tests
//!
//! End-to-end resolution of freeform text against the built-in catalog.

#[cfg(test)]
mod tests {
    use dishcovery::knowledge_base::KnowledgeBase;
    use dishcovery::matcher::{
        ambiguous_pairs, best_match, resolve, top_candidates, MatchResult, ACCEPT_THRESHOLD,
        SUGGEST_THRESHOLD,
    };
    use dishcovery::similarity::{JaroWinkler, WeightedRatio};

    fn kb() -> KnowledgeBase {
        KnowledgeBase::builtin().expect("built-in knowledge base")
    }

    #[test]
    fn test_typo_is_accepted() {
        let kb = kb();
        match resolve("tomatoe", kb.catalog(), &WeightedRatio) {
            MatchResult::FuzzyAccepted { canonical, score } => {
                assert_eq!(canonical, "tomato");
                assert!(score >= ACCEPT_THRESHOLD);
            }
            other => panic!("expected fuzzy acceptance, got {:?}", other),
        }
    }

    #[test]
    fn test_common_misspellings() {
        let kb = kb();
        for (typo, expected) in [
            ("chiken", "chicken"),
            ("brocoli", "broccoli"),
            ("spagetti", "spaghetti"),
            ("mozarella", "mozzarella"),
        ] {
            let result = resolve(typo, kb.catalog(), &WeightedRatio);
            assert_eq!(result.canonical(), Some(expected), "{} -> {:?}", typo, result);
        }
    }

    #[test]
    fn test_gibberish_is_rejected() {
        let kb = kb();
        assert_eq!(
            resolve("xyzzyzzz", kb.catalog(), &WeightedRatio),
            MatchResult::Rejected
        );
    }

    #[test]
    fn test_near_miss_is_suggested() {
        let kb = kb();
        match resolve("soy souce", kb.catalog(), &WeightedRatio) {
            MatchResult::FuzzySuggested { suggestion, score } => {
                assert_eq!(suggestion, "soy sauce");
                assert!((SUGGEST_THRESHOLD..ACCEPT_THRESHOLD).contains(&score));
            }
            other => panic!("expected a suggestion, got {:?}", other),
        }
    }

    #[test]
    fn test_every_catalog_name_is_exact() {
        let kb = kb();
        for name in kb.catalog().names() {
            let upper = format!("  {}  ", name.to_uppercase());
            assert_eq!(
                resolve(&upper, kb.catalog(), &WeightedRatio),
                MatchResult::Exact {
                    canonical: name.to_string()
                }
            );
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let kb = kb();
        for query in ["tomatoe", "soy souce", "olive oyl", "chees", "xyz"] {
            let first = resolve(query, kb.catalog(), &WeightedRatio);
            for _ in 0..5 {
                assert_eq!(resolve(query, kb.catalog(), &WeightedRatio), first);
            }
        }
    }

    #[test]
    fn test_token_order_does_not_matter() {
        let kb = kb();
        let (name, score) = best_match("sauce soy", kb.catalog(), &WeightedRatio).unwrap();
        assert_eq!(name, "soy sauce");
        assert!(score >= ACCEPT_THRESHOLD);
    }

    #[test]
    fn test_jaro_winkler_scorer_is_pluggable() {
        let kb = kb();
        let result = resolve("tomatoe", kb.catalog(), &JaroWinkler);
        assert_eq!(result.canonical(), Some("tomato"));
    }

    #[test]
    fn test_ambiguous_pairs_are_reported() {
        let kb = kb();
        let pairs = ambiguous_pairs(kb.catalog(), &WeightedRatio);
        assert!(pairs
            .iter()
            .any(|(a, b, _)| a == "tomato" && b == "tomato paste"));
        assert!(pairs.iter().all(|(a, b, score)| a < b && *score >= ACCEPT_THRESHOLD));
    }

    #[test]
    fn test_tied_acceptance_is_only_suggested() {
        let kb = kb();
        for (query, first) in [("sauce", "fish sauce"), ("ric", "basmati rice")] {
            let top = top_candidates(query, kb.catalog(), &WeightedRatio);
            assert!(top.len() > 1, "{} should tie", query);
            assert!(top[0].1 >= ACCEPT_THRESHOLD);

            match resolve(query, kb.catalog(), &WeightedRatio) {
                MatchResult::FuzzySuggested { suggestion, score } => {
                    assert_eq!(suggestion, first);
                    assert!(score >= ACCEPT_THRESHOLD);
                }
                other => panic!("{} must not auto-accept, got {:?}", query, other),
            }
        }
    }

    #[test]
    fn test_clear_winner_near_a_tie_is_accepted() {
        let kb = kb();
        // cheese 90.9 beats blue cheese and cream cheese at 90
        let result = resolve("chees", kb.catalog(), &WeightedRatio);
        assert_eq!(result.canonical(), Some("cheese"));
        assert!(matches!(result, MatchResult::FuzzyAccepted { .. }));
    }
}
