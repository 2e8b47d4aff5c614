//! subject identifier type.
//!
//! a subject is an authenticated actor (an employee account, a service
//! account). the engine treats subjects as opaque ids; their permission
//! grants and role flag come from the permission source at decision time.

use serde::{Deserialize, Serialize};

/// unique identifier for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(pub u64);

impl SubjectId {
    /// create a new subject id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// get the raw id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for SubjectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
