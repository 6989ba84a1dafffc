//! Session ingredient list.
//!
//! Insertion order is kept for display. Duplicates are allowed; components
//! that need set semantics call [`IngredientSet::distinct`] or
//! [`IngredientSet::lookup`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered canonical ingredients accumulated for one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientSet(Vec<String>);

impl IngredientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one accepted canonical ingredient
    pub fn push(&mut self, canonical: impl Into<String>) {
        self.0.push(canonical.into());
    }

    /// Session reset
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|ing| ing == name)
    }

    /// Unique ingredients in first-seen order
    pub fn distinct(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.iter().filter(|ing| seen.insert(*ing)).collect()
    }

    /// Membership set for subset checks
    pub fn lookup(&self) -> HashSet<&str> {
        self.iter().collect()
    }
}

impl From<Vec<String>> for IngredientSet {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl<'a> FromIterator<&'a str> for IngredientSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl FromIterator<String> for IngredientSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a IngredientSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
