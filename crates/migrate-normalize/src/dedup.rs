//! First-seen deduplication by identity key.
//!
//! A [`DedupIndex`] is created for one extraction pass and dropped after it.
//! Values are grouped by category (`Avarias`, `Clientes`, ...); within a
//! category the first spelling of a value wins and every later spelling with
//! the same identity key is logged as a duplicate of it.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::hash::sha256_hex;
use crate::identity::identity_key;

/// SHA-256 hex digest of a value's identity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DedupKey(String);

impl DedupKey {
    pub fn of(raw: &str) -> Self {
        Self(sha256_hex(identity_key(raw).as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of [`DedupIndex::put`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOutcome {
    /// True when the value was the first of its identity in the category.
    pub accepted: bool,
    /// The stored spelling for this identity.
    pub representative: String,
}

/// A rejected spelling and the representative it collapsed into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEntry {
    pub value: String,
    pub representative: String,
}

#[derive(Debug, Default)]
struct CategoryIndex {
    seen: HashMap<DedupKey, usize>,
    representatives: Vec<String>,
    duplicates: Vec<DuplicateEntry>,
}

#[derive(Debug, Default)]
pub struct DedupIndex {
    categories: BTreeMap<String, CategoryIndex>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a raw value to a category.
    pub fn put(&mut self, category: &str, raw: &str) -> PutOutcome {
        let index = self.categories.entry(category.to_string()).or_default();
        let key = DedupKey::of(raw);

        if let Some(&position) = index.seen.get(&key) {
            let representative = index.representatives[position].clone();
            trace!(category, key = %key, "duplicate value collapsed");
            index.duplicates.push(DuplicateEntry {
                value: raw.to_string(),
                representative: representative.clone(),
            });
            return PutOutcome {
                accepted: false,
                representative,
            };
        }

        index.seen.insert(key, index.representatives.len());
        index.representatives.push(raw.to_string());
        PutOutcome {
            accepted: true,
            representative: raw.to_string(),
        }
    }

    /// Accepted values of a category in first-seen order.
    pub fn representatives(&self, category: &str) -> &[String] {
        self.categories
            .get(category)
            .map_or(&[], |index| index.representatives.as_slice())
    }

    /// Rejected values per category, categories in name order.
    ///
    /// Categories without duplicates are skipped.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &[DuplicateEntry])> {
        self.categories
            .iter()
            .filter(|(_, index)| !index.duplicates.is_empty())
            .map(|(name, index)| (name.as_str(), index.duplicates.as_slice()))
    }

    pub fn category_duplicate_count(&self, category: &str) -> usize {
        self.categories
            .get(category)
            .map_or(0, |index| index.duplicates.len())
    }

    pub fn duplicate_count(&self) -> usize {
        self.categories
            .values()
            .map(|index| index.duplicates.len())
            .sum()
    }

    pub fn into_report(self) -> DuplicatesReport {
        let total = self.duplicate_count();
        let categories = self
            .categories
            .into_iter()
            .filter(|(_, index)| !index.duplicates.is_empty())
            .map(|(name, index)| {
                let summary = CategoryDuplicates {
                    distinct: index.representatives.len(),
                    duplicates: index.duplicates,
                };
                (name, summary)
            })
            .collect();
        DuplicatesReport { total, categories }
    }
}

/// Serializable audit of every collapsed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuplicatesReport {
    pub total: usize,
    pub categories: BTreeMap<String, CategoryDuplicates>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDuplicates {
    /// Number of distinct values kept.
    pub distinct: usize,
    pub duplicates: Vec<DuplicateEntry>,
}

impl DuplicatesReport {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
