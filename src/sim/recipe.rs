//! Recipe table: which two block types merge into what
//!
//! Recipes are unordered. Each pair is stored once under a canonical key
//! (lexicographically ordered), so `lookup(a, b)` and `lookup(b, a)` always
//! hit the same entry.

use std::collections::HashMap;

use super::catalog::CatalogError;

/// Canonical, order-independent key for a pair of block type ids
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey(String, String);

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }

    /// The two inputs, smaller id first
    pub fn inputs(&self) -> (&str, &str) {
        (&self.0, &self.1)
    }
}

/// Lookup table from unordered type pair to result type
#[derive(Debug, Clone, Default)]
pub struct RecipeTable {
    entries: HashMap<PairKey, String>,
}

impl RecipeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recipe. A second entry for the same unordered pair is rejected,
    /// even when it names the same result.
    pub fn insert(&mut self, a: &str, b: &str, result: &str) -> Result<(), CatalogError> {
        let key = PairKey::new(a, b);
        if let Some(existing) = self.entries.get(&key) {
            return Err(CatalogError::DuplicateRecipe {
                a: key.0,
                b: key.1,
                first: existing.clone(),
                second: result.to_string(),
            });
        }
        self.entries.insert(key, result.to_string());
        Ok(())
    }

    /// Result of merging `a` with `b`, if any recipe matches
    pub fn lookup(&self, a: &str, b: &str) -> Option<&str> {
        self.entries.get(&PairKey::new(a, b)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(inputs, result)` in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }
}
