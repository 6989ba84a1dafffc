//! # Knowledge Base Tests
//!
//! Loading from disk, fallback behavior and fail-fast validation.

#[cfg(test)]
mod tests {
    use dishcovery::errors::AppError;
    use dishcovery::knowledge_base::{load_knowledge_base, Category, KnowledgeBase};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"{
        "catalog": [
            {"name": "rice", "categories": ["carb"]},
            {"name": "garlic", "categories": ["aromatic"]},
            {"name": "salt", "categories": ["flavor"]},
            {"name": "olive oil", "categories": ["fat"]}
        ],
        "sufficiency_policy": [
            {"key": "base", "categories": ["carb"], "remedies": ["rice"]},
            {"key": "seasoning", "categories": ["flavor", "aromatic"], "min_count": 2}
        ]
    }"#;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write temp file");
        file
    }

    #[test]
    fn test_minimal_file_loads() {
        let file = write_temp(MINIMAL);
        let kb = KnowledgeBase::from_file(file.path()).unwrap();

        assert_eq!(kb.catalog().len(), 4);
        assert!(kb.cuisines().is_empty());
        assert!(kb.bad_combos().is_empty());
        assert_eq!(kb.policy().clauses[0].min_count, 1);
        assert_eq!(kb.policy().clauses[1].min_count, 2);
        assert!(kb.catalog().categories_of("olive oil").contains(&Category::Fat));
    }

    #[test]
    fn test_explicit_path_is_used() {
        let file = write_temp(MINIMAL);
        let path = file.path().to_string_lossy().to_string();
        let kb = load_knowledge_base(Some(path.as_str())).unwrap();
        assert!(!kb.catalog().contains("tomato"));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let err = load_knowledge_base(Some("/nonexistent/knowledge_base.json")).unwrap_err();
        assert!(matches!(err, AppError::FileSystem(_)));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let file = write_temp("{ \"catalog\": [ ");
        let err = KnowledgeBase::from_file(file.path()).unwrap_err();
        assert!(matches!(err, AppError::KnowledgeBase(_)));
        assert!(err.to_string().starts_with("[KNOWLEDGE_BASE]"));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let json = MINIMAL.replace("\"fat\"", "\"umami\"");
        assert!(KnowledgeBase::from_json(&json).is_err());
    }

    #[test]
    fn test_unnormalized_catalog_name_is_fatal() {
        let json = MINIMAL.replace("\"olive oil\"", "\"Olive  Oil\"");
        let err = KnowledgeBase::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("not-normalized"));
    }

    #[test]
    fn test_dangling_remedy_is_fatal() {
        let json = MINIMAL.replace("\"remedies\": [\"rice\"]", "\"remedies\": [\"quinoa\"]");
        let err = KnowledgeBase::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("quinoa"));
    }

    #[test]
    fn test_empty_policy_is_fatal() {
        let json = r#"{"catalog": [{"name": "rice", "categories": ["carb"]}], "sufficiency_policy": []}"#;
        let err = KnowledgeBase::from_json(json).unwrap_err();
        assert!(err.to_string().contains("sufficiency_policy cannot be empty"));
    }

    #[test]
    fn test_lowercase_country_code_is_fatal() {
        let json = MINIMAL.replace(
            "\"sufficiency_policy\"",
            r#""cuisines": [{"name": "Spanish", "country": {"code": "es", "name": "Spain"}, "weights": {"rice": 1}}],
            "sufficiency_policy""#,
        );
        let err = KnowledgeBase::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("invalid country code 'es'"));
    }

    #[test]
    fn test_substitution_for_self_forbidden_target_is_fatal() {
        let json = MINIMAL.replace(
            "\"sufficiency_policy\"",
            r#""restrictions": [{"name": "low_sodium", "forbid": ["salt"]}],
            "substitutions": [{"ingredient": "salt", "replacements": {"low_sodium": "salt"}}],
            "sufficiency_policy""#,
        );
        let err = KnowledgeBase::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("still forbidden"));
    }
}
