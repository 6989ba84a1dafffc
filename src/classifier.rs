//! Category lookup for canonical ingredients.

use crate::ingredient_set::IngredientSet;
use crate::knowledge_base::{Catalog, Category};
use std::collections::{BTreeMap, BTreeSet};

/// Categories of one canonical ingredient.
///
/// Uncategorized or unknown ingredients yield the empty set; they remain
/// valid ingredients that simply count toward no requirement.
pub fn categories_of(canonical: &str, catalog: &Catalog) -> BTreeSet<Category> {
    catalog.categories_of(canonical)
}

/// Occurrences per category. Every category appears, with 0 when absent.
pub fn category_counts(ingredients: &IngredientSet, catalog: &Catalog) -> BTreeMap<Category, usize> {
    let mut counts: BTreeMap<Category, usize> = Category::ALL.iter().map(|c| (*c, 0)).collect();
    for ingredient in ingredients.iter() {
        for category in catalog.categories_of(ingredient) {
            *counts.entry(category).or_insert(0) += 1;
        }
    }
    counts
}
