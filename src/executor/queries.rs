//! SELECT with result memoization.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::core::TableData;
use crate::parser::Clause;

/// Memoizes filtered results, keyed on row-set and clause content.
///
/// The cache is owned by the executor and `invalidate` runs after every
/// mutation, so identical content recurring across a mutation can never
/// serve stale rows. Lookups hand out owned copies; stored results are
/// never exposed by reference.
#[derive(Debug, Default)]
pub struct SelectCache {
    entries: HashMap<(u64, u64), TableData>,
}

impl SelectCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every memoized result. Must run whenever any table's rows
    /// change.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(rows: &TableData, clause: &Clause) -> (u64, u64) {
        (content_hash(rows), content_hash(clause))
    }
}

fn content_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Returns the rows matching every clause pair, or the full set when no
/// clause is given. Pure: the input rows are never modified.
#[must_use]
pub fn select(rows: &TableData, filter: Option<&Clause>, cache: &mut SelectCache) -> TableData {
    let Some(clause) = filter else {
        return rows.clone();
    };

    let key = SelectCache::key(rows, clause);
    if let Some(hit) = cache.entries.get(&key) {
        return hit.clone();
    }

    let matched: TableData = rows.iter().filter(|row| clause.matches(row)).cloned().collect();
    cache.entries.insert(key, matched.clone());
    matched
}
