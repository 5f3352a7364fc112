//! Fuzzy matching over generic items.
//!
//! Items are serialized once when the matcher is built (or its list or keys
//! change), and the strings found at the configured key paths are kept as
//! the index. Queries only run the skim scorer over that index.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher as _;
use serde::Serialize;
use serde_json::Value;

use super::key_path::{to_value, KeyPath};
use crate::error::ExpatResult;

/// Bonus added when a key starts with the query, so prefix hits outrank
/// scattered subsequence hits.
const PREFIX_BOOST: i64 = 100;

/// A ranked match. Higher scores are better.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<T> {
    pub item: T,
    pub score: i64,
    /// Position of the item in the source list.
    pub index: usize,
}

/// Indexed fuzzy matcher over a list of items.
pub struct FuzzyMatcher<T> {
    items: Vec<T>,
    values: Vec<Value>,
    keys: Vec<KeyPath>,
    haystacks: Vec<Vec<String>>,
    matcher: SkimMatcherV2,
}

impl<T: Serialize + Clone> FuzzyMatcher<T> {
    /// Build the matcher and its index.
    pub fn new(items: Vec<T>, keys: Vec<KeyPath>) -> ExpatResult<Self> {
        let mut matcher = Self {
            items: Vec::new(),
            values: Vec::new(),
            keys,
            haystacks: Vec::new(),
            matcher: SkimMatcherV2::default().ignore_case(),
        };
        matcher.set_items(items)?;
        Ok(matcher)
    }

    /// Replace the item list and rebuild the index.
    pub fn set_items(&mut self, items: Vec<T>) -> ExpatResult<()> {
        self.values = items.iter().map(to_value).collect::<ExpatResult<_>>()?;
        self.items = items;
        self.reindex();
        Ok(())
    }

    /// Replace the match keys and rebuild the index.
    pub fn set_keys(&mut self, keys: Vec<KeyPath>) {
        self.keys = keys;
        self.reindex();
    }

    fn reindex(&mut self) {
        self.haystacks = self
            .values
            .iter()
            .map(|value| {
                self.keys
                    .iter()
                    .flat_map(|key| key.strings_in(value))
                    .map(String::from)
                    .collect()
            })
            .collect();

        tracing::debug!(
            items = self.items.len(),
            keys = self.keys.len(),
            "rebuilt fuzzy index"
        );
    }

    /// All matches for `query`, best first. Ties keep source order.
    pub fn search(&self, query: &str) -> Vec<MatchResult<T>> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let query_lower = query.to_lowercase();
        let mut scored: Vec<(usize, i64)> = self
            .haystacks
            .iter()
            .enumerate()
            .filter_map(|(index, haystack)| {
                haystack
                    .iter()
                    .filter_map(|text| {
                        let score = self.matcher.fuzzy_match(text, query)?;
                        let boost = if text.to_lowercase().starts_with(&query_lower) {
                            PREFIX_BOOST
                        } else {
                            0
                        };
                        Some(score + boost)
                    })
                    .max()
                    .map(|score| (index, score))
            })
            .collect();

        // sort_by is stable, so equal scores stay in list order
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        scored
            .into_iter()
            .map(|(index, score)| MatchResult {
                item: self.items[index].clone(),
                score,
                index,
            })
            .collect()
    }

    /// Matches for `query`, at most `max_results` of them.
    pub fn search_capped(&self, query: &str, max_results: usize) -> Vec<MatchResult<T>> {
        let mut results = self.search(query);
        results.truncate(max_results);
        results
    }

    /// The serialized form of the item at `index` in the source list.
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn keys(&self) -> &[KeyPath] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
