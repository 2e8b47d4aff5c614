//! error types for staffrail-authz.

use staffrail_types::{Permission, SubjectId};
use thiserror::Error;

/// errors that can occur in staffrail-authz.
///
/// a denied check is not an error - it is the [`Decision::Denied`] value
/// returned by the engine, so that policy checks compose without
/// error-driven control flow.
///
/// [`Decision::Denied`]: crate::Decision::Denied
#[derive(Debug, Error)]
pub enum Error {
    /// the permission source could not resolve the subject id.
    ///
    /// propagated as-is rather than mapped to a denial, so an unknown
    /// subject stays distinguishable from a legitimate permission failure.
    #[error("subject not found: {0}")]
    SubjectNotFound(SubjectId),

    /// failed to parse json hierarchy configuration.
    #[error("failed to parse hierarchy JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    /// a hierarchy entry failed validation.
    #[error("invalid hierarchy entry for {permission}: {cause}")]
    InvalidHierarchy {
        /// the implying permission of the invalid entry.
        permission: Permission,
        /// the specific validation error.
        cause: ValidationError,
    },
}

/// validation errors for hierarchy configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// the wildcard token is never expanded further, so it cannot appear
    /// as an implying key.
    #[error("the wildcard token cannot imply other permissions")]
    WildcardImplier,
}

/// result type for staffrail-authz operations.
pub type Result<T> = std::result::Result<T, Error>;
