//! # Knowledge Base
//!
//! Read-only culinary configuration shared by every engine component:
//!
//! - the ingredient **catalog** with category tags
//! - dietary **restriction** rules (forbidden ingredient sets)
//! - **substitution** rules per (ingredient, restriction)
//! - weighted **cuisine** profiles with an optional country
//! - known **bad combinations** with remedies
//! - the **sufficiency policy** with per-clause remedies
//!
//! The tables are loaded once from JSON (`config/knowledge_base.json`, or the
//! copy embedded in the binary), validated by [`crate::validation`] and never
//! mutated afterwards.

use crate::errors::{error_logging, AppError, AppResult};
use crate::text_processing::normalize;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Knowledge base shipped with the crate.
pub const BUILTIN_KNOWLEDGE_BASE: &str = include_str!("../config/knowledge_base.json");

/// Functional role of an ingredient in a dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Protein,
    Carb,
    Flavor,
    Veg,
    Aromatic,
    Liquid,
    Fat,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Category; 7] = [
        Category::Protein,
        Category::Carb,
        Category::Flavor,
        Category::Veg,
        Category::Aromatic,
        Category::Liquid,
        Category::Fat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Protein => "protein",
            Category::Carb => "carb",
            Category::Flavor => "flavor",
            Category::Veg => "veg",
            Category::Aromatic => "aromatic",
            Category::Liquid => "liquid",
            Category::Fat => "fat",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog row as stored in the JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub categories: BTreeSet<Category>,
}

/// Canonical ingredient names and their category tags.
///
/// Names are kept in lexicographic order, which is also the order the
/// matcher scans them in.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, BTreeSet<Category>>,
}

impl Catalog {
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Category set of a canonical ingredient; empty when uncategorized or unknown.
    pub fn categories_of(&self, name: &str) -> BTreeSet<Category> {
        self.entries.get(name).cloned().unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Restriction name and the ingredients it forbids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictionRule {
    pub name: String,
    pub forbid: BTreeSet<String>,
}

/// Replacements for one ingredient, keyed by restriction name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionRule {
    pub ingredient: String,
    pub replacements: BTreeMap<String, String>,
}

/// Single country a cuisine can be attributed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, uppercase
    pub code: String,
    pub name: String,
}

impl Country {
    /// Emoji flag built from regional indicator symbols.
    ///
    /// ```
    /// use dishcovery::knowledge_base::Country;
    ///
    /// let italy = Country { code: "IT".to_string(), name: "Italy".to_string() };
    /// assert_eq!(italy.flag(), "\u{1F1EE}\u{1F1F9}");
    /// ```
    pub fn flag(&self) -> String {
        self.code
            .bytes()
            .filter(u8::is_ascii_uppercase)
            .filter_map(|b| char::from_u32(0x1F1E6 + u32::from(b - b'A')))
            .collect()
    }
}

/// Weighted ingredient hints for one cuisine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuisineProfile {
    pub name: String,
    /// Absent for regional cuisines (e.g. "Middle Eastern")
    #[serde(default)]
    pub country: Option<Country>,
    pub weights: BTreeMap<String, u32>,
}

impl CuisineProfile {
    /// Whether the presentation layer may pair this cuisine with a country flag
    pub fn is_flaggable(&self) -> bool {
        self.country.is_some()
    }

    pub fn weight_of(&self, ingredient: &str) -> u32 {
        self.weights.get(ingredient).copied().unwrap_or(0)
    }
}

/// Ingredient subset that makes a poor dish on its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadCombo {
    pub ingredients: BTreeSet<String>,
    pub remedies: Vec<String>,
}

impl BadCombo {
    /// True when every ingredient of the combo is present
    pub fn is_contained_in(&self, present: &HashSet<&str>) -> bool {
        self.ingredients
            .iter()
            .all(|ing| present.contains(ing.as_str()))
    }
}

/// "At least `min_count` ingredients belonging to any of `categories`"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementClause {
    pub key: String,
    pub categories: BTreeSet<Category>,
    #[serde(default = "default_min_count")]
    pub min_count: usize,
    #[serde(default)]
    pub remedies: Vec<String>,
}

fn default_min_count() -> usize {
    1
}

impl RequirementClause {
    pub fn matches(&self, categories: &BTreeSet<Category>) -> bool {
        !self.categories.is_disjoint(categories)
    }
}

/// Ordered requirement clauses used by the sufficiency evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SufficiencyPolicy {
    pub clauses: Vec<RequirementClause>,
}

impl SufficiencyPolicy {
    pub fn clause(&self, key: &str) -> Option<&RequirementClause> {
        self.clauses.iter().find(|clause| clause.key == key)
    }
}

/// Raw, unvalidated knowledge base as it appears on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseData {
    pub catalog: Vec<CatalogEntry>,
    #[serde(default)]
    pub restrictions: Vec<RestrictionRule>,
    #[serde(default)]
    pub substitutions: Vec<SubstitutionRule>,
    #[serde(default)]
    pub cuisines: Vec<CuisineProfile>,
    #[serde(default)]
    pub bad_combos: Vec<BadCombo>,
    pub sufficiency_policy: SufficiencyPolicy,
}

/// Validated, indexed knowledge base
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    catalog: Catalog,
    restrictions: Vec<RestrictionRule>,
    substitutions: HashMap<String, BTreeMap<String, String>>,
    cuisines: Vec<CuisineProfile>,
    bad_combos: Vec<BadCombo>,
    policy: SufficiencyPolicy,
}

impl KnowledgeBase {
    /// Validate raw tables and build the lookup indexes.
    ///
    /// Any integrity violation is returned as [`AppError::KnowledgeBase`];
    /// callers are expected to treat it as fatal.
    pub fn new(data: KnowledgeBaseData) -> AppResult<Self> {
        crate::validation::validate_knowledge_base(&data)?;

        let catalog = Catalog {
            entries: data
                .catalog
                .into_iter()
                .map(|entry| (entry.name, entry.categories))
                .collect(),
        };
        let substitutions = data
            .substitutions
            .into_iter()
            .map(|rule| (rule.ingredient, rule.replacements))
            .collect();

        let kb = Self {
            catalog,
            restrictions: data.restrictions,
            substitutions,
            cuisines: data.cuisines,
            bad_combos: data.bad_combos,
            policy: data.sufficiency_policy,
        };

        debug!(
            catalog_size = kb.catalog.len(),
            restrictions = kb.restrictions.len(),
            cuisines = kb.cuisines.len(),
            bad_combos = kb.bad_combos.len(),
            policy_clauses = kb.policy.clauses.len(),
            "Knowledge base indexed"
        );
        Ok(kb)
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> AppResult<Self> {
        let data: KnowledgeBaseData = serde_json::from_str(json)?;
        Self::new(data)
    }

    /// Read, parse and validate a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::FileSystem(format!(
                "Failed to read knowledge base '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// The knowledge base embedded at compile time
    pub fn builtin() -> AppResult<Self> {
        Self::from_json(BUILTIN_KNOWLEDGE_BASE)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn restriction(&self, name: &str) -> Option<&RestrictionRule> {
        self.restrictions.iter().find(|rule| rule.name == name)
    }

    pub fn restriction_names(&self) -> impl Iterator<Item = &str> {
        self.restrictions.iter().map(|rule| rule.name.as_str())
    }

    /// Replacement for `ingredient` under `restriction`, if one is configured
    pub fn substitution(&self, ingredient: &str, restriction: &str) -> Option<&str> {
        self.substitutions
            .get(ingredient)
            .and_then(|by_restriction| by_restriction.get(restriction))
            .map(String::as_str)
    }

    pub fn cuisines(&self) -> &[CuisineProfile] {
        &self.cuisines
    }

    pub fn cuisine(&self, name: &str) -> Option<&CuisineProfile> {
        self.cuisines.iter().find(|profile| profile.name == name)
    }

    pub fn bad_combos(&self) -> &[BadCombo] {
        &self.bad_combos
    }

    pub fn policy(&self) -> &SufficiencyPolicy {
        &self.policy
    }
}

/// Load the knowledge base used at startup.
///
/// Resolution order:
/// 1. `explicit_path` (usually `KNOWLEDGE_BASE_PATH`); unreadable is an error
/// 2. the first existing fallback path
/// 3. the embedded [`BUILTIN_KNOWLEDGE_BASE`]
///
/// A file that exists but fails to parse or validate is always an error;
/// there is no silent fallback past a broken configuration.
pub fn load_knowledge_base(explicit_path: Option<&str>) -> AppResult<KnowledgeBase> {
    if let Some(path) = explicit_path {
        info!(path = %path, "Loading knowledge base from configured path");
        return KnowledgeBase::from_file(path).inspect_err(|e| {
            error_logging::log_knowledge_base_error(e, "load_knowledge_base", Some(path));
        });
    }

    let possible_paths = [
        "/app/config/knowledge_base.json", // Docker path
        "config/knowledge_base.json",      // Local development path
        "../config/knowledge_base.json",   // Test path
    ];

    for path in &possible_paths {
        if !Path::new(path).is_file() {
            continue;
        }
        info!(path = %path, "Loading knowledge base from fallback path");
        return KnowledgeBase::from_file(path).inspect_err(|e| {
            error_logging::log_knowledge_base_error(e, "load_knowledge_base", Some(path));
        });
    }

    warn!("No knowledge base file found in any expected location. Using built-in tables.");
    KnowledgeBase::builtin().inspect_err(|e| {
        error_logging::log_knowledge_base_error(e, "load_knowledge_base", Some("builtin"));
    })
}

/// Normalize every name of a raw knowledge base in place.
///
/// Useful for hand-written tables; validation still rejects names that are
/// not normalized, so this is opt-in.
pub fn normalize_names(data: &mut KnowledgeBaseData) {
    for entry in &mut data.catalog {
        entry.name = normalize(&entry.name);
    }
    for rule in &mut data.restrictions {
        rule.forbid = rule.forbid.iter().map(|name| normalize(name)).collect();
    }
    for rule in &mut data.substitutions {
        rule.ingredient = normalize(&rule.ingredient);
        for replacement in rule.replacements.values_mut() {
            *replacement = normalize(replacement);
        }
    }
    for profile in &mut data.cuisines {
        profile.weights = std::mem::take(&mut profile.weights)
            .into_iter()
            .map(|(name, weight)| (normalize(&name), weight))
            .collect();
    }
    for combo in &mut data.bad_combos {
        combo.ingredients = combo.ingredients.iter().map(|name| normalize(name)).collect();
        for remedy in &mut combo.remedies {
            *remedy = normalize(remedy);
        }
    }
    for clause in &mut data.sufficiency_policy.clauses {
        for remedy in &mut clause.remedies {
            *remedy = normalize(remedy);
        }
    }
}
