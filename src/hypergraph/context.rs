// CHLA - Contextual Hypergraph
// context.rs - Context labels and canonical context pair keys
//
// Copyright (c) 2026 CIPS Corps. All rights reserved.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque context identifier ("User A", "Morning", "Electronics").
///
/// No internal structure is assumed. Labels compare and sort by their
/// string value, which is what pair canonicalization relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextLabel(String);

impl ContextLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContextLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for ContextLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for ContextLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unordered pair of two distinct contexts, stored in sorted order.
///
/// `ContextPair::new(a, b)` and `ContextPair::new(b, a)` produce equal
/// keys, so a relation between two contexts has exactly one slot in the
/// store no matter which side it was named from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContextPair {
    first: ContextLabel,
    second: ContextLabel,
}

impl ContextPair {
    /// Canonicalize two labels into a pair key.
    ///
    /// Returns `None` when both labels are the same context: a relation
    /// always joins two different contexts.
    pub fn new(a: ContextLabel, b: ContextLabel) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The lexicographically smaller label.
    pub fn first(&self) -> &ContextLabel {
        &self.first
    }

    /// The lexicographically larger label.
    pub fn second(&self) -> &ContextLabel {
        &self.second
    }

    /// Whether `label` is one of the two ends of this pair.
    pub fn contains(&self, label: &ContextLabel) -> bool {
        &self.first == label || &self.second == label
    }
}

impl fmt::Display for ContextPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Every 2-combination of `labels`, canonicalized.
///
/// Pairs come out in nested index order: outer index i, inner index j > i.
/// Equal labels at different positions yield no pair.
pub fn context_pairs(labels: &[ContextLabel]) -> Vec<ContextPair> {
    let mut pairs = Vec::with_capacity(labels.len() * labels.len().saturating_sub(1) / 2);
    for (i, a) in labels.iter().enumerate() {
        for b in &labels[i + 1..] {
            if let Some(pair) = ContextPair::new(a.clone(), b.clone()) {
                pairs.push(pair);
            }
        }
    }
    pairs
}

/// Convenience for building a label list from string literals.
pub fn labels<I, S>(names: I) -> Vec<ContextLabel>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(ContextLabel::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> ContextPair {
        ContextPair::new(a.into(), b.into()).unwrap()
    }

    #[test]
    fn test_pair_is_order_independent() {
        assert_eq!(pair("Morning", "User A"), pair("User A", "Morning"));
        let p = pair("User A", "Morning");
        assert_eq!(p.first().as_str(), "Morning");
        assert_eq!(p.second().as_str(), "User A");
    }

    #[test]
    fn test_pair_rejects_same_context() {
        assert!(ContextPair::new("A".into(), "A".into()).is_none());
    }

    #[test]
    fn test_pair_display() {
        assert_eq!(pair("B", "A").to_string(), "(A, B)");
    }

    #[test]
    fn test_pair_contains() {
        let p = pair("Clothing", "Evening");
        assert!(p.contains(&"Clothing".into()));
        assert!(p.contains(&"Evening".into()));
        assert!(!p.contains(&"Morning".into()));
    }

    #[test]
    fn test_context_pairs_nested_order() {
        let pairs = context_pairs(&labels(["C", "A", "B"]));
        assert_eq!(pairs, vec![pair("A", "C"), pair("B", "C"), pair("A", "B")]);
    }

    #[test]
    fn test_context_pairs_too_few_labels() {
        assert!(context_pairs(&[]).is_empty());
        assert!(context_pairs(&labels(["Solo"])).is_empty());
    }

    #[test]
    fn test_label_serializes_as_plain_string() {
        let json = serde_json::to_string(&ContextLabel::from("User A")).unwrap();
        assert_eq!(json, "\"User A\"");
    }
}
