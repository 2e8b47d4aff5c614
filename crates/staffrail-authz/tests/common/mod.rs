//! shared fixtures for staffrail-authz integration tests.

use std::collections::HashMap;

use staffrail_authz::{Error, PermissionSet, Result, SubjectGrants, SubjectPermissionSource};
use staffrail_types::SubjectId;

/// a permission source that uses an in-memory map of subjects.
///
/// this stands in for the database-backed source the request layer wires
/// up in production.
pub struct MapPermissionSource {
    subjects: HashMap<SubjectId, SubjectGrants>,
}

impl MapPermissionSource {
    /// create an empty source (every fetch fails with SubjectNotFound).
    pub fn empty() -> Self {
        Self {
            subjects: HashMap::new(),
        }
    }

    /// register a subject's grants.
    pub fn with_subject(mut self, id: SubjectId, grants: SubjectGrants) -> Self {
        self.subjects.insert(id, grants);
        self
    }
}

impl SubjectPermissionSource for MapPermissionSource {
    fn fetch(&self, subject: SubjectId) -> Result<SubjectGrants> {
        self.subjects
            .get(&subject)
            .cloned()
            .ok_or(Error::SubjectNotFound(subject))
    }
}

/// parse a slice of tokens into a permission set.
pub fn perms(tokens: &[&str]) -> PermissionSet {
    tokens.iter().map(|t| t.parse().unwrap()).collect()
}
