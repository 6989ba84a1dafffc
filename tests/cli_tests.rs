//! # CLI Tests
//!
//! Argument parsing and the printed assessment, end to end through the engine.

#[cfg(test)]
mod tests {
    use clap::Parser;
    use dishcovery::cli::{format_assessment, format_slot, CliArgs};
    use dishcovery::engine::Engine;
    use dishcovery::ingredient_set::IngredientSet;
    use dishcovery::localization::LocalizationManager;

    fn setup() -> (Engine, LocalizationManager) {
        (
            Engine::with_defaults().unwrap(),
            LocalizationManager::new().unwrap(),
        )
    }

    #[test]
    fn test_sufficient_indian_dish() {
        let (engine, manager) = setup();
        let set: IngredientSet = ["garam masala", "basmati rice", "chicken", "onion", "ghee"]
            .into_iter()
            .collect();
        let assessment = engine.assess::<&str>(&set, &[]);
        let lines = format_assessment(&assessment, &manager, "en");

        assert_eq!(
            lines,
            vec![
                "What you have: 1 protein, 1 carb, 1 flavor, 1 aromatic, 1 fat".to_string(),
                "You have enough to cook a dish.".to_string(),
                "Probable origin: Indian \u{1F1EE}\u{1F1F3}".to_string(),
            ]
        );
    }

    #[test]
    fn test_covered_but_short_asks_for_more() {
        let manager = LocalizationManager::new().unwrap();
        let engine = Engine::with_defaults().unwrap().with_min_ingredients(5);
        let set: IngredientSet = ["garlic", "rice", "salt", "olive oil"].into_iter().collect();
        let assessment = engine.assess::<&str>(&set, &[]);
        let lines = format_assessment(&assessment, &manager, "en");

        assert!(assessment.sufficiency.sufficient);
        assert!(lines
            .iter()
            .any(|line| line == "Enough variety per category, but use at least 5 different ingredients."));
        assert!(!lines.iter().any(|line| line == "You have enough to cook a dish."));
    }

    #[test]
    fn test_restricted_and_incomplete() {
        let (engine, manager) = setup();
        let set: IngredientSet = ["butter", "chicken"].into_iter().collect();
        let assessment = engine.assess(&set, &["vegan"]);
        let lines = format_assessment(&assessment, &manager, "en");

        assert_eq!(lines[0], "Replaced butter with olive oil (vegan)");
        assert_eq!(lines[1], "Replaced chicken with tofu (vegan)");
        assert!(lines
            .iter()
            .any(|line| line.starts_with("Not quite a dish yet. Missing: an aromatic or a vegetable")));
        assert!(lines.iter().any(|line| line.starts_with("Try adding: garlic, onion")));
    }

    #[test]
    fn test_everything_removed() {
        let (engine, manager) = setup();
        let set: IngredientSet = ["pasta", "bread"].into_iter().collect();
        let assessment = engine.assess(&set, &["gluten_free"]);
        let lines = format_assessment(&assessment, &manager, "fr");

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "pasta retiré (gluten_free)");
        assert!(assessment.all_restricted);
    }

    #[test]
    fn test_regional_origin_has_no_flag() {
        let (engine, manager) = setup();
        let set: IngredientSet = ["tahini", "yogurt"].into_iter().collect();
        let assessment = engine.assess::<&str>(&set, &[]);
        let lines = format_assessment(&assessment, &manager, "en");
        assert_eq!(lines.last().unwrap(), "Probable origin: Middle Eastern");
    }

    #[test]
    fn test_slot_captions() {
        let (engine, manager) = setup();
        let pass = engine.evaluate_slots(&["tomatoe", "soy souce", "xyzzyzzz", ""]);

        assert_eq!(format_slot(&pass.slots[0], &manager, "en"), "✓ tomato");
        assert_eq!(
            format_slot(&pass.slots[1], &manager, "en"),
            "✗ soy souce (did you mean soy sauce?)"
        );
        assert_eq!(
            format_slot(&pass.slots[2], &manager, "en"),
            "✗ xyzzyzzz (unknown ingredient)"
        );
        assert_eq!(format_slot(&pass.slots[3], &manager, "en"), "…");
    }

    #[test]
    fn test_parse_full_command_line() {
        let args = CliArgs::try_parse_from([
            "dishcovery",
            "--restrict",
            "vegetarian",
            "--restrict",
            "vegan",
            "--lang",
            "fr",
            "--metrics",
            "beef",
            "rice",
        ])
        .unwrap();
        assert_eq!(args.restrictions, vec!["vegetarian", "vegan"]);
        assert_eq!(args.language.as_deref(), Some("fr"));
        assert!(args.metrics);
        assert_eq!(args.ingredients, vec!["beef", "rice"]);
    }
}
