//! boundary contract for fetching subject grants.

use staffrail_types::SubjectId;

use crate::effective::SubjectGrants;
use crate::error::Result;

/// supplies the raw grant tuple for a subject.
///
/// implementations live in the consuming layer (typically a database
/// lookup joining the subject's own grants with those of its current
/// position). the engine only consumes the returned shape; any caching,
/// timeout or retry policy belongs to the implementation.
pub trait SubjectPermissionSource {
    /// fetch the grants for a subject.
    ///
    /// fails with [`Error::SubjectNotFound`] if the id is unresolvable -
    /// never with an empty grant tuple, which would be indistinguishable
    /// from a legitimate permission failure.
    ///
    /// [`Error::SubjectNotFound`]: crate::Error::SubjectNotFound
    fn fetch(&self, subject: SubjectId) -> Result<SubjectGrants>;
}
