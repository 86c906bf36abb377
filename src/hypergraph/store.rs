// CHLA - Contextual Hypergraph
// store.rs - Relation strengths keyed by context pair
//
// Copyright (c) 2026 CIPS Corps. All rights reserved.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hypergraph::context::ContextPair;

/// Mapping from context pair to relation strength.
///
/// Entries keep the position of their first insertion, so iteration
/// visits pairs in the order the initializer created them. Entries are
/// never removed; overwriting a value leaves its position unchanged.
///
/// Values are unbounded. They start in [0, 1) but rewards are applied
/// without clamping, so they drift in either direction.
#[derive(Debug, Clone, Default)]
pub struct RelationStore {
    /// (pair, strength) in insertion order.
    entries: Vec<(ContextPair, f64)>,

    /// Position of each pair in `entries`.
    index: HashMap<ContextPair, usize>,
}

impl RelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the strength for `pair`.
    pub fn set(&mut self, pair: ContextPair, value: f64) {
        match self.index.get(&pair) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(pair.clone(), self.entries.len());
                self.entries.push((pair, value));
            }
        }
    }

    /// Strength stored for `pair`, or `None` if it was never set.
    pub fn get(&self, pair: &ContextPair) -> Option<f64> {
        self.index.get(pair).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, pair: &ContextPair) -> bool {
        self.index.contains_key(pair)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All (pair, strength) entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ContextPair, f64)> + '_ {
        self.entries.iter().map(|(pair, value)| (pair, *value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &ContextPair> + '_ {
        self.entries.iter().map(|(pair, _)| pair)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, value)| *value)
    }

    /// The entry with the largest strength.
    ///
    /// Ties go to the earliest inserted pair. `None` on an empty store.
    pub fn max_entry(&self) -> Option<(&ContextPair, f64)> {
        self.iter().fold(None, |best, (pair, value)| match best {
            Some((_, top)) if value <= top => best,
            _ => Some((pair, value)),
        })
    }

    /// Summary statistics over all strengths. `None` on an empty store.
    pub fn stats(&self) -> Option<RelationStats> {
        if self.is_empty() {
            return None;
        }

        let total_weight: f64 = self.values().sum();
        let min = self.values().fold(f64::INFINITY, f64::min);
        let max = self.values().fold(f64::NEG_INFINITY, f64::max);

        Some(RelationStats {
            relations: self.len(),
            min,
            max,
            mean: total_weight / self.len() as f64,
            total_weight,
        })
    }
}

/// Summary statistics about the relation strengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelationStats {
    pub relations: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub total_weight: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> ContextPair {
        ContextPair::new(a.into(), b.into()).unwrap()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = RelationStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.max_entry().is_none());
        assert!(store.stats().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let mut store = RelationStore::new();
        store.set(pair("A", "B"), 0.25);
        assert_eq!(store.get(&pair("A", "B")), Some(0.25));
        assert_eq!(store.get(&pair("B", "A")), Some(0.25));
        assert!(store.contains(&pair("B", "A")));
    }

    #[test]
    fn test_get_absent_is_none() {
        let mut store = RelationStore::new();
        store.set(pair("A", "B"), 0.25);
        assert_eq!(store.get(&pair("A", "C")), None);
    }

    #[test]
    fn test_overwrite_does_not_grow() {
        let mut store = RelationStore::new();
        store.set(pair("A", "B"), 0.1);
        store.set(pair("A", "C"), 0.2);
        store.set(pair("B", "A"), -3.5);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&pair("A", "B")), Some(-3.5));
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut store = RelationStore::new();
        store.set(pair("Y", "Z"), 0.1);
        store.set(pair("A", "B"), 0.2);
        store.set(pair("M", "N"), 0.3);
        // Overwrite keeps the original slot
        store.set(pair("Y", "Z"), 0.9);

        let keys: Vec<String> = store.keys().map(|p| p.to_string()).collect();
        assert_eq!(keys, vec!["(Y, Z)", "(A, B)", "(M, N)"]);
        let values: Vec<f64> = store.values().collect();
        assert_eq!(values, vec![0.9, 0.2, 0.3]);
    }

    #[test]
    fn test_max_entry() {
        let mut store = RelationStore::new();
        store.set(pair("A", "B"), 0.2);
        store.set(pair("A", "C"), 0.9);
        store.set(pair("B", "C"), 0.5);

        let (best, value) = store.max_entry().unwrap();
        assert_eq!(best, &pair("A", "C"));
        assert_eq!(value, 0.9);
    }

    #[test]
    fn test_max_entry_tie_prefers_first() {
        let mut store = RelationStore::new();
        store.set(pair("A", "B"), 0.7);
        store.set(pair("A", "C"), 0.7);
        assert_eq!(store.max_entry().unwrap().0, &pair("A", "B"));
    }

    #[test]
    fn test_max_entry_all_negative() {
        let mut store = RelationStore::new();
        store.set(pair("A", "B"), -2.0);
        store.set(pair("A", "C"), -0.5);
        assert_eq!(store.max_entry().unwrap().1, -0.5);
    }

    #[test]
    fn test_stats() {
        let mut store = RelationStore::new();
        store.set(pair("A", "B"), 0.2);
        store.set(pair("A", "C"), 0.9);
        store.set(pair("B", "C"), 0.4);

        let stats = store.stats().unwrap();
        assert_eq!(stats.relations, 3);
        assert_eq!(stats.min, 0.2);
        assert_eq!(stats.max, 0.9);
        assert!((stats.total_weight - 1.5).abs() < 1e-12);
        assert!((stats.mean - 0.5).abs() < 1e-12);
    }
}
