//! permission-based access control for staffrail.
//!
//! this crate implements the authorization engine behind every privileged
//! operation in staffrail. Decisions use deny-by-default semantics: a check
//! passes only if the subject's effective permissions satisfy the requested
//! condition. Effective permissions are the closure of the subject's direct
//! and position-inherited grants over a declarative implication hierarchy,
//! with the reserved wildcard token `*` absorbing every check.

#![warn(missing_docs)]

pub mod condition;
pub mod effective;
pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod set;
pub mod source;

pub use condition::{AccessContext, Condition};
pub use effective::{EffectivePermissions, SubjectGrants};
pub use engine::{AuthzEngine, Decision};
pub use error::{Error, Result, ValidationError};
pub use hierarchy::Hierarchy;
pub use set::PermissionSet;
pub use source::SubjectPermissionSource;
