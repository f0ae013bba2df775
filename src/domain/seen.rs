use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::IdentityKey;

/// Identity keys already processed. Ordered so persisted output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenSet {
    keys: BTreeSet<IdentityKey>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.keys.contains(key)
    }

    /// Returns `true` if the key was not present yet.
    pub fn insert(&mut self, key: IdentityKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Union of both sets.
    pub fn merged(&self, other: &SeenSet) -> SeenSet {
        let mut merged = self.clone();
        merged.keys.extend(other.keys.iter().cloned());
        merged
    }
}

impl FromIterator<IdentityKey> for SeenSet {
    fn from_iter<I: IntoIterator<Item = IdentityKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_novelty() {
        let mut seen = SeenSet::new();
        assert!(seen.insert("a".into()));
        assert!(!seen.insert("a".into()));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_merged_is_union() {
        let a: SeenSet = ["k1", "k2"].into_iter().map(IdentityKey::from).collect();
        let b: SeenSet = ["k2", "k3"].into_iter().map(IdentityKey::from).collect();
        let merged = a.merged(&b);
        assert_eq!(merged.len(), 3);
        assert!(merged.contains(&"k1".into()));
        assert!(merged.contains(&"k3".into()));
    }

    #[test]
    fn test_serializes_sorted_array() {
        let seen: SeenSet = ["c", "a", "b"].into_iter().map(IdentityKey::from).collect();
        assert_eq!(serde_json::to_string(&seen).unwrap(), r#"["a","b","c"]"#);
    }
}
