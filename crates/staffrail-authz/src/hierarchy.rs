//! declarative permission implication hierarchy.
//!
//! the hierarchy maps each permission token to the tokens it implies, e.g.
//! granting `admin.manage` can imply `user.edit` and `user.delete`. It is
//! loaded once at process start and treated as immutable configuration;
//! the graph is not required to be acyclic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use staffrail_types::Permission;

use crate::error::{Error, ValidationError};
use crate::set::PermissionSet;

/// a directed graph of permission implications.
///
/// serializes as a json object mapping each token to the tokens it implies:
///
/// ```json
/// {
///     "admin.manage": ["user.edit", "user.delete"],
///     "user.edit": ["user.view"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hierarchy {
    /// implication edges: each key grants every token in its value set.
    pub implications: HashMap<Permission, PermissionSet>,
}

impl Hierarchy {
    /// create an empty hierarchy (no implications).
    pub fn empty() -> Self {
        Self::default()
    }

    /// parse a hierarchy from a json string.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let hierarchy: Hierarchy = serde_json::from_str(json)?;
        hierarchy.validate()?;
        Ok(hierarchy)
    }

    /// validate all entries in the hierarchy.
    ///
    /// the wildcard token is never expanded, so it may not appear as an
    /// implying key. Implying the wildcard is allowed: a subject can
    /// legitimately inherit `*` through the hierarchy.
    pub fn validate(&self) -> Result<(), Error> {
        for permission in self.implications.keys() {
            if permission.is_wildcard() {
                return Err(Error::InvalidHierarchy {
                    permission: permission.clone(),
                    cause: ValidationError::WildcardImplier,
                });
            }
        }
        Ok(())
    }

    /// compute the transitive closure of a seed set over this hierarchy.
    ///
    /// returns exactly the tokens reachable from the seed, inclusive of
    /// the seed itself. Each token is expanded at most once, so the
    /// traversal terminates on cyclic graphs. A token with no outgoing
    /// edges contributes itself and nothing else.
    pub fn expand(&self, seed: &PermissionSet) -> PermissionSet {
        let mut expanded = PermissionSet::new();
        let mut pending: Vec<Permission> = seed.iter().cloned().collect();

        while let Some(token) = pending.pop() {
            // insert doubles as the visited guard
            if !expanded.insert(token.clone()) {
                continue;
            }
            if let Some(implied) = self.implications.get(&token) {
                for permission in implied.iter() {
                    if !expanded.contains(permission) {
                        pending.push(permission.clone());
                    }
                }
            }
        }

        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perms(tokens: &[&str]) -> PermissionSet {
        tokens.iter().map(|t| t.parse().unwrap()).collect()
    }

    fn hierarchy(edges: &[(&str, &[&str])]) -> Hierarchy {
        let mut h = Hierarchy::empty();
        for (from, to) in edges {
            h.implications.insert(from.parse().unwrap(), perms(to));
        }
        h
    }

    #[test]
    fn test_expand_empty_hierarchy() {
        let h = Hierarchy::empty();
        let seed = perms(&["user.edit"]);
        assert_eq!(h.expand(&seed), seed);
    }

    #[test]
    fn test_expand_includes_seed() {
        let h = hierarchy(&[("admin.manage", &["user.edit", "user.delete"])]);
        let expanded = h.expand(&perms(&["admin.manage"]));
        assert_eq!(expanded, perms(&["admin.manage", "user.edit", "user.delete"]));
    }

    #[test]
    fn test_expand_transitive() {
        let h = hierarchy(&[
            ("admin.manage", &["user.edit"]),
            ("user.edit", &["user.view"]),
        ]);
        let expanded = h.expand(&perms(&["admin.manage"]));
        assert!(expanded.contains(&"user.view".parse().unwrap()));
    }

    #[test]
    fn test_expand_terminates_on_cycle() {
        let h = hierarchy(&[("a", &["b"]), ("b", &["a"])]);
        let expanded = h.expand(&perms(&["a"]));
        assert_eq!(expanded, perms(&["a", "b"]));
    }

    #[test]
    fn test_expand_self_cycle() {
        let h = hierarchy(&[("a", &["a", "b"])]);
        let expanded = h.expand(&perms(&["a"]));
        assert_eq!(expanded, perms(&["a", "b"]));
    }

    #[test]
    fn test_expand_diamond() {
        let h = hierarchy(&[
            ("top", &["left", "right"]),
            ("left", &["bottom"]),
            ("right", &["bottom"]),
        ]);
        let expanded = h.expand(&perms(&["top"]));
        assert_eq!(expanded, perms(&["top", "left", "right", "bottom"]));
    }

    #[test]
    fn test_expand_unknown_token_contributes_itself() {
        let h = hierarchy(&[("admin.manage", &["user.edit"])]);
        let expanded = h.expand(&perms(&["payroll.run"]));
        assert_eq!(expanded, perms(&["payroll.run"]));
    }

    #[test]
    fn test_expand_idempotent() {
        let h = hierarchy(&[
            ("admin.manage", &["user.edit", "user.delete"]),
            ("user.edit", &["user.view"]),
        ]);
        let once = h.expand(&perms(&["admin.manage"]));
        let twice = h.expand(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_expand_can_reach_wildcard() {
        let h = hierarchy(&[("admin.all", &["*"])]);
        let expanded = h.expand(&perms(&["admin.all"]));
        assert!(expanded.contains_wildcard());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "admin.manage": ["user.edit", "user.delete"],
            "user.edit": ["user.view"]
        }"#;
        let h = Hierarchy::from_json(json).unwrap();
        assert_eq!(h.implications.len(), 2);

        let expanded = h.expand(&perms(&["admin.manage"]));
        assert!(expanded.contains(&"user.view".parse().unwrap()));
    }

    #[test]
    fn test_from_json_empty() {
        let h = Hierarchy::from_json("{}").unwrap();
        assert!(h.implications.is_empty());
    }

    #[test]
    fn test_from_json_rejects_wildcard_key() {
        let json = r#"{"*": ["user.edit"]}"#;
        let result = Hierarchy::from_json(json);
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidHierarchy {
                cause: ValidationError::WildcardImplier,
                ..
            }
        ));
    }

    #[test]
    fn test_from_json_rejects_malformed_token() {
        let json = r#"{"admin.manage": ["not a token"]}"#;
        let result = Hierarchy::from_json(json);
        assert!(matches!(result.unwrap_err(), Error::ParseJson(_)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let h = hierarchy(&[("admin.manage", &["user.edit"])]);
        let json = serde_json::to_string(&h).unwrap();
        let parsed: Hierarchy = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, h);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // a small closed universe of tokens so random graphs actually connect
    fn token_strategy() -> impl Strategy<Value = Permission> {
        (0u8..8).prop_map(|n| format!("perm.p{}", n).parse().unwrap())
    }

    fn hierarchy_strategy() -> impl Strategy<Value = Hierarchy> {
        proptest::collection::hash_map(
            token_strategy(),
            proptest::collection::hash_set(token_strategy(), 0..4),
            0..8,
        )
        .prop_map(|edges| {
            let mut h = Hierarchy::empty();
            for (from, to) in edges {
                h.implications.insert(from, to.into_iter().collect());
            }
            h
        })
    }

    fn seed_strategy() -> impl Strategy<Value = PermissionSet> {
        proptest::collection::hash_set(token_strategy(), 0..5)
            .prop_map(|s| s.into_iter().collect())
    }

    proptest! {
        #[test]
        fn expand_terminates_and_includes_seed(h in hierarchy_strategy(), seed in seed_strategy()) {
            // arbitrary graphs may contain cycles; expansion must still
            // terminate and cover the seed
            let expanded = h.expand(&seed);
            for p in seed.iter() {
                prop_assert!(expanded.contains(p));
            }
        }

        #[test]
        fn expand_idempotent(h in hierarchy_strategy(), seed in seed_strategy()) {
            let once = h.expand(&seed);
            let twice = h.expand(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn expand_monotone_in_seed(h in hierarchy_strategy(), seed in seed_strategy(), extra in token_strategy()) {
            let mut larger = seed.clone();
            larger.insert(extra);
            let from_seed = h.expand(&seed);
            let from_larger = h.expand(&larger);
            for p in from_seed.iter() {
                prop_assert!(from_larger.contains(p));
            }
        }
    }
}
