//! unordered set of permission tokens.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use staffrail_types::Permission;

/// an unordered collection of unique permission tokens.
///
/// union is commutative and idempotent; membership tests are O(1)
/// amortized. Serializes as a plain json array of tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(HashSet<Permission>);

impl PermissionSet {
    /// create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// number of tokens in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// whether the set contains no tokens.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// add a token to the set.
    ///
    /// returns `true` if the token was not already present.
    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    /// whether the set contains the given token.
    pub fn contains(&self, permission: &Permission) -> bool {
        self.0.contains(permission)
    }

    /// whether the set contains the reserved wildcard token `*`.
    pub fn contains_wildcard(&self) -> bool {
        self.0.contains("*")
    }

    /// the deduplicating union of two sets.
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.0.extend(other.0.iter().cloned());
        merged
    }

    /// iterate over the tokens in the set (no defined order).
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Permission> for PermissionSet {
    fn extend<I: IntoIterator<Item = Permission>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for PermissionSet {
    type Item = Permission;
    type IntoIter = std::collections::hash_set::IntoIter<Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
