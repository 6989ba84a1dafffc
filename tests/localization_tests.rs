//! # Localization Tests
//!
//! This module contains unit tests for the localization functionality,
//! testing message retrieval and formatting with various edge cases.

use dishcovery::localization::{create_localization_manager, detect_language, LocalizationManager};
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_localization() -> Arc<LocalizationManager> {
        create_localization_manager().expect("Failed to create localization manager")
    }

    #[test]
    fn test_get_message_existing_key() {
        let manager = setup_localization();

        let message = manager.get_message_in_language("feasibility-ok", "en", None);
        assert_eq!(message, "You have enough to cook a dish.");
    }

    #[test]
    fn test_get_message_nonexistent_key() {
        let manager = setup_localization();

        let message = manager.get_message_in_language("nonexistent-key", "en", None);
        assert!(message.starts_with("Missing translation:"));
    }

    #[test]
    fn test_get_message_unsupported_language() {
        let manager = setup_localization();

        let message = manager.get_message_in_language("feasibility-ok", "unsupported", None);
        // Should fall back to English
        assert_eq!(message, "You have enough to cook a dish.");
    }

    #[test]
    fn test_get_message_with_args() {
        let manager = setup_localization();

        let mut args = HashMap::new();
        args.insert("original", "butter");
        args.insert("replacement", "olive oil");
        args.insert("restrictions", "vegan");

        let message = manager.get_message_in_language("change-replaced", "en", Some(&args));
        assert_eq!(message, "Replaced butter with olive oil (vegan)");
    }

    #[test]
    fn test_french_messages() {
        let manager = setup_localization();

        let message = manager.get_message_with_args_in_language(
            "change-removed",
            "fr",
            &[("original", "pasta"), ("restrictions", "gluten_free")],
        );
        assert_eq!(message, "pasta retiré (gluten_free)");
    }

    #[test]
    fn test_every_english_key_is_translated() {
        let manager = setup_localization();
        let keys = [
            "prompt-ingredient",
            "slot-valid",
            "slot-suggested",
            "slot-rejected",
            "slot-empty",
            "feasibility-ok",
            "feasibility-missing",
            "feasibility-more",
            "have-summary",
            "clause-aromatic_or_veg",
            "clause-protein_or_carb",
            "clause-flavor",
            "clause-liquid_or_fat",
            "suggestions",
            "bad-combo",
            "change-replaced",
            "change-removed",
            "all-restricted",
            "origin-confident",
            "origin-regional",
            "origin-uncertain",
            "origin-none",
        ];
        for key in keys {
            assert!(manager.has_message(key, "en"), "en is missing {}", key);
            assert!(manager.has_message(key, "fr"), "fr is missing {}", key);
        }
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language(Some("fr_FR")), "fr");
        assert_eq!(detect_language(Some("EN-us")), "en");
        assert_eq!(detect_language(Some("es")), "en");
        assert_eq!(detect_language(Some("")), "en");
        assert_eq!(detect_language(None), "en");
    }
}
