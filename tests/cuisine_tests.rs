//! # Cuisine Inference Tests

#[cfg(test)]
mod tests {
    use dishcovery::cuisine::{infer, DEFAULT_CONFIDENCE_THRESHOLD};
    use dishcovery::ingredient_set::IngredientSet;
    use dishcovery::knowledge_base::KnowledgeBase;

    fn set(items: &[&str]) -> IngredientSet {
        items.iter().copied().collect()
    }

    #[test]
    fn test_indian_is_confident() {
        let kb = KnowledgeBase::builtin().unwrap();
        let inference = infer(
            &set(&["garam masala", "basmati rice"]),
            kb.cuisines(),
            DEFAULT_CONFIDENCE_THRESHOLD,
        );

        assert_eq!(inference.cuisine.as_deref(), Some("Indian"));
        assert_eq!(inference.score, 4);
        assert!(inference.confident);
        assert!(inference.flaggable);
        let country = inference.flag_country().expect("India should be flagged");
        assert_eq!(country.code, "IN");
        assert_eq!(country.flag(), "\u{1F1EE}\u{1F1F3}");
    }

    #[test]
    fn test_raising_the_threshold_removes_confidence() {
        let kb = KnowledgeBase::builtin().unwrap();
        let inference = infer(&set(&["garam masala", "basmati rice"]), kb.cuisines(), 5);

        assert_eq!(inference.cuisine.as_deref(), Some("Indian"));
        assert!(!inference.confident);
        assert!(inference.flag_country().is_none());
    }

    #[test]
    fn test_nothing_scores() {
        let kb = KnowledgeBase::builtin().unwrap();
        let inference = infer(&set(&["potato", "salt"]), kb.cuisines(), 3);
        assert_eq!(inference.cuisine, None);
        assert_eq!(inference.score, 0);
        assert!(!inference.confident);
        assert!(inference.ranking.is_empty());
    }

    #[test]
    fn test_ranking_is_best_first() {
        let kb = KnowledgeBase::builtin().unwrap();
        let inference = infer(
            &set(&["tomato", "parmesan", "garlic", "basil"]),
            kb.cuisines(),
            3,
        );

        assert_eq!(inference.cuisine.as_deref(), Some("Italian"));
        assert_eq!(inference.score, 4);
        assert_eq!(inference.ranking[0].cuisine, "Italian");
        assert!(inference
            .ranking
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn test_regional_cuisine_is_never_flagged() {
        let kb = KnowledgeBase::builtin().unwrap();
        let inference = infer(&set(&["tahini", "yogurt"]), kb.cuisines(), 3);
        assert_eq!(inference.cuisine.as_deref(), Some("Middle Eastern"));
        assert!(inference.confident);
        assert!(!inference.flaggable);
        assert!(inference.flag_country().is_none());
    }
}
