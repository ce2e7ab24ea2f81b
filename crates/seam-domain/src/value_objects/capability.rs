//! Capability sets
//!
//! The set of contracts an implementation declares itself to satisfy. It is
//! computed once when the implementation is registered and never changes, so
//! decorator predicates are plain membership tests over it.

use std::collections::BTreeSet;

use serde::Serialize;

use super::{ContractFamily, ContractKey};

/// Ordered, immutable-after-registration set of contract keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    keys: BTreeSet<ContractKey>,
}

impl CapabilitySet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key (builder form)
    pub fn with(mut self, key: ContractKey) -> Self {
        self.keys.insert(key);
        self
    }

    /// Add a key; returns whether it was new
    pub fn insert(&mut self, key: ContractKey) -> bool {
        self.keys.insert(key)
    }

    /// Exact membership test
    pub fn contains(&self, key: &ContractKey) -> bool {
        self.keys.contains(key)
    }

    /// Whether any closed contract of `family` is declared
    pub fn contains_family(&self, family: ContractFamily) -> bool {
        self.keys.iter().any(|key| key.family() == family)
    }

    /// Distinct families declared, in key order
    pub fn families(&self) -> Vec<ContractFamily> {
        let mut families: Vec<ContractFamily> = self.keys.iter().map(|k| k.family()).collect();
        families.dedup();
        families
    }

    /// Iterate over declared keys
    pub fn iter(&self) -> impl Iterator<Item = &ContractKey> {
        self.keys.iter()
    }

    /// Number of declared keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no key is declared
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<ContractKey> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = ContractKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[ContractKey; N]> for CapabilitySet {
    fn from(keys: [ContractKey; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a CapabilitySet {
    type Item = &'a ContractKey;
    type IntoIter = std::collections::btree_set::Iter<'a, ContractKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}
