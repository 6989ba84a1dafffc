//! Validation module for knowledge base integrity
//!
//! Every table of the knowledge base is checked before the engine serves a
//! single request. A failed check is fatal at startup, never at call time:
//!
//! - catalog names are non-empty, unique and already normalized
//! - every referenced ingredient exists in the catalog
//! - substitution targets are allowed under the restriction that triggers them
//! - cuisine weights are positive and country codes are ISO alpha-2
//! - policy clauses are well formed

use crate::errors::{AppError, AppResult};
use crate::knowledge_base::KnowledgeBaseData;
use crate::text_processing::is_normalized;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashSet};

lazy_static! {
    static ref COUNTRY_CODE_PATTERN: Regex =
        Regex::new(r"^[A-Z]{2}$").expect("Invalid country code regex pattern");
}

/// Validate a catalog name
///
/// # Returns
/// * `Ok(())` - name is usable as a canonical ingredient
/// * `Err(&str)` - error type: "empty" or "not-normalized"
///
/// # Examples
/// ```
/// use dishcovery::validation::validate_canonical_name;
///
/// assert!(validate_canonical_name("olive oil").is_ok());
/// assert_eq!(validate_canonical_name(""), Err("empty"));
/// assert_eq!(validate_canonical_name("Olive Oil"), Err("not-normalized"));
/// ```
pub fn validate_canonical_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("empty");
    }
    if !is_normalized(name) {
        return Err("not-normalized");
    }
    Ok(())
}

/// Validate an ISO 3166-1 alpha-2 country code (uppercase)
///
/// # Examples
/// ```
/// use dishcovery::validation::is_valid_country_code;
///
/// assert!(is_valid_country_code("JP"));
/// assert!(!is_valid_country_code("jp"));
/// assert!(!is_valid_country_code("JPN"));
/// ```
pub fn is_valid_country_code(code: &str) -> bool {
    COUNTRY_CODE_PATTERN.is_match(code)
}

/// Check referential integrity and rule consistency of a raw knowledge base.
///
/// All problems are collected so a broken file can be fixed in one pass.
pub fn validate_knowledge_base(data: &KnowledgeBaseData) -> AppResult<()> {
    let mut problems: Vec<String> = Vec::new();

    let catalog = validate_catalog(data, &mut problems);
    let forbidden = validate_restrictions(data, &catalog, &mut problems);
    validate_substitutions(data, &catalog, &forbidden, &mut problems);
    validate_cuisines(data, &catalog, &mut problems);
    validate_bad_combos(data, &catalog, &mut problems);
    validate_policy(data, &catalog, &mut problems);

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::KnowledgeBase(problems.join("; ")))
    }
}

fn validate_catalog<'a>(data: &'a KnowledgeBaseData, problems: &mut Vec<String>) -> HashSet<&'a str> {
    let mut names = HashSet::new();

    if data.catalog.is_empty() {
        problems.push("catalog cannot be empty".to_string());
    }

    for (i, entry) in data.catalog.iter().enumerate() {
        if let Err(kind) = validate_canonical_name(&entry.name) {
            problems.push(format!("catalog[{}] '{}' is {}", i, entry.name, kind));
        }
        if !names.insert(entry.name.as_str()) {
            problems.push(format!("catalog entry '{}' is duplicated", entry.name));
        }
    }

    names
}

fn validate_restrictions<'a>(
    data: &'a KnowledgeBaseData,
    catalog: &HashSet<&str>,
    problems: &mut Vec<String>,
) -> BTreeMap<&'a str, &'a BTreeSet<String>> {
    let mut forbidden = BTreeMap::new();

    for rule in &data.restrictions {
        if rule.name.trim().is_empty() {
            problems.push("restriction name cannot be empty".to_string());
            continue;
        }
        if forbidden.insert(rule.name.as_str(), &rule.forbid).is_some() {
            problems.push(format!("restriction '{}' is defined twice", rule.name));
        }
        for ingredient in &rule.forbid {
            if !catalog.contains(ingredient.as_str()) {
                problems.push(format!(
                    "restriction '{}' forbids unknown ingredient '{}'",
                    rule.name, ingredient
                ));
            }
        }
    }

    forbidden
}

fn validate_substitutions(
    data: &KnowledgeBaseData,
    catalog: &HashSet<&str>,
    forbidden: &BTreeMap<&str, &BTreeSet<String>>,
    problems: &mut Vec<String>,
) {
    let mut seen = HashSet::new();

    for rule in &data.substitutions {
        if !catalog.contains(rule.ingredient.as_str()) {
            problems.push(format!(
                "substitution source '{}' is not in the catalog",
                rule.ingredient
            ));
        }
        if !seen.insert(rule.ingredient.as_str()) {
            problems.push(format!(
                "substitution rules for '{}' are defined twice",
                rule.ingredient
            ));
        }

        for (restriction, replacement) in &rule.replacements {
            if !catalog.contains(replacement.as_str()) {
                problems.push(format!(
                    "substitution target '{}' (for '{}' under '{}') is not in the catalog",
                    replacement, rule.ingredient, restriction
                ));
            }
            match forbidden.get(restriction.as_str()) {
                None => problems.push(format!(
                    "substitution for '{}' names undefined restriction '{}'",
                    rule.ingredient, restriction
                )),
                Some(forbid) if forbid.contains(replacement) => problems.push(format!(
                    "substitution '{}' -> '{}' is still forbidden under '{}'",
                    rule.ingredient, replacement, restriction
                )),
                Some(_) => {}
            }
        }
    }
}

fn validate_cuisines(data: &KnowledgeBaseData, catalog: &HashSet<&str>, problems: &mut Vec<String>) {
    let mut names = HashSet::new();

    for profile in &data.cuisines {
        if profile.name.trim().is_empty() {
            problems.push("cuisine name cannot be empty".to_string());
        }
        if !names.insert(profile.name.as_str()) {
            problems.push(format!("cuisine '{}' is defined twice", profile.name));
        }
        if let Some(country) = &profile.country {
            if !is_valid_country_code(&country.code) {
                problems.push(format!(
                    "cuisine '{}' has invalid country code '{}'",
                    profile.name, country.code
                ));
            }
            if country.name.trim().is_empty() {
                problems.push(format!("cuisine '{}' has an empty country name", profile.name));
            }
        }
        for (ingredient, weight) in &profile.weights {
            if *weight == 0 {
                problems.push(format!(
                    "cuisine '{}' gives '{}' a zero weight",
                    profile.name, ingredient
                ));
            }
            if !catalog.contains(ingredient.as_str()) {
                problems.push(format!(
                    "cuisine '{}' references unknown ingredient '{}'",
                    profile.name, ingredient
                ));
            }
        }
    }
}

fn validate_bad_combos(data: &KnowledgeBaseData, catalog: &HashSet<&str>, problems: &mut Vec<String>) {
    for (i, combo) in data.bad_combos.iter().enumerate() {
        if combo.ingredients.is_empty() {
            problems.push(format!("bad_combos[{}] has no ingredients", i));
        }
        for ingredient in combo.ingredients.iter().chain(combo.remedies.iter()) {
            if !catalog.contains(ingredient.as_str()) {
                problems.push(format!(
                    "bad_combos[{}] references unknown ingredient '{}'",
                    i, ingredient
                ));
            }
        }
    }
}

fn validate_policy(data: &KnowledgeBaseData, catalog: &HashSet<&str>, problems: &mut Vec<String>) {
    let clauses = &data.sufficiency_policy.clauses;
    if clauses.is_empty() {
        problems.push("sufficiency_policy cannot be empty".to_string());
    }

    let mut keys = HashSet::new();
    for clause in clauses {
        if clause.key.trim().is_empty() {
            problems.push("sufficiency_policy clause key cannot be empty".to_string());
        }
        if !keys.insert(clause.key.as_str()) {
            problems.push(format!("sufficiency_policy clause '{}' is duplicated", clause.key));
        }
        if clause.categories.is_empty() {
            problems.push(format!("clause '{}' has no categories", clause.key));
        }
        if clause.min_count == 0 {
            problems.push(format!("clause '{}' must require at least 1 ingredient", clause.key));
        }
        for remedy in &clause.remedies {
            if !catalog.contains(remedy.as_str()) {
                problems.push(format!(
                    "clause '{}' suggests unknown ingredient '{}'",
                    clause.key, remedy
                ));
            }
        }
    }
}
