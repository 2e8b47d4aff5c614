//! effective permission resolution.
//!
//! a subject's effective permissions are computed fresh per authorization
//! decision (or reused within one request via the engine's cache-taking
//! entry point) and never persisted: grants can change between requests.

use serde::{Deserialize, Serialize};
use staffrail_types::Permission;

use crate::hierarchy::Hierarchy;
use crate::set::PermissionSet;

/// the per-subject grant tuple supplied by a permission source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectGrants {
    /// role-level superuser flag (ordinary vs. super-subject).
    #[serde(default)]
    pub superuser: bool,

    /// permissions granted directly to the subject.
    #[serde(default)]
    pub direct: PermissionSet,

    /// permissions inherited from the subject's currently-held position.
    #[serde(default)]
    pub position: PermissionSet,
}

/// a subject's fully resolved permissions at decision time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePermissions {
    superuser: bool,
    permissions: PermissionSet,
}

impl EffectivePermissions {
    /// build from an already-resolved flag and set.
    pub fn new(superuser: bool, permissions: PermissionSet) -> Self {
        Self {
            superuser,
            permissions,
        }
    }

    /// resolve a subject's grants against the implication hierarchy.
    ///
    /// a role-flagged superuser collapses to the bare wildcard set without
    /// touching the hierarchy at all. Everyone else gets the closure of
    /// their direct and position grants; if that closure contains `*`
    /// (granted directly or inherited), the subject is a superuser too.
    pub fn resolve(grants: SubjectGrants, hierarchy: &Hierarchy) -> Self {
        if grants.superuser {
            let mut permissions = PermissionSet::new();
            permissions.insert(Permission::wildcard());
            return Self {
                superuser: true,
                permissions,
            };
        }

        let seed = grants.direct.union(&grants.position);
        let permissions = hierarchy.expand(&seed);
        let superuser = permissions.contains_wildcard();

        Self {
            superuser,
            permissions,
        }
    }

    /// whether the subject is a superuser.
    pub fn is_superuser(&self) -> bool {
        self.superuser
    }

    /// the resolved permission set.
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// whether every check passes outright: the superuser flag is set or
    /// the wildcard token is held.
    ///
    /// both paths to superuser status (role flag, inherited `*`) funnel
    /// through this one predicate so they cannot diverge downstream.
    pub fn is_unrestricted(&self) -> bool {
        self.superuser || self.permissions.contains_wildcard()
    }
}
