//! the authorization engine.

use std::sync::Arc;

use staffrail_types::SubjectId;
use tracing::{debug, trace};

use crate::condition::{AccessContext, Condition};
use crate::effective::EffectivePermissions;
use crate::error::Result;
use crate::hierarchy::Hierarchy;
use crate::source::SubjectPermissionSource;

/// thread-safe authorization engine.
///
/// wraps the implication hierarchy in arc for cheap cloning and concurrent
/// access. every decision method takes &self and mutates nothing, so
/// concurrent checks for different subjects need no coordination.
pub struct AuthzEngine {
    hierarchy: Arc<Hierarchy>,
}

impl AuthzEngine {
    /// create a new engine with the given hierarchy.
    pub fn new(hierarchy: Hierarchy) -> Self {
        Self {
            hierarchy: Arc::new(hierarchy),
        }
    }

    /// create an engine with an empty hierarchy (no implications).
    pub fn empty() -> Self {
        Self::new(Hierarchy::empty())
    }

    /// replace the hierarchy atomically.
    pub fn update_hierarchy(&mut self, hierarchy: Hierarchy) {
        self.hierarchy = Arc::new(hierarchy);
    }

    /// get the current hierarchy (for serialisation).
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// fetch and resolve a subject's effective permissions.
    ///
    /// the result may be reused across several `authorize_resolved` calls
    /// within the same request, so the fetch-and-expand step runs at most
    /// once per request. It must not outlive the request: grants can
    /// change between requests.
    pub fn effective_permissions<S>(
        &self,
        source: &S,
        subject: SubjectId,
    ) -> Result<EffectivePermissions>
    where
        S: SubjectPermissionSource + ?Sized,
    {
        let grants = source.fetch(subject)?;
        let effective = EffectivePermissions::resolve(grants, &self.hierarchy);
        trace!(
            subject = %subject,
            superuser = effective.is_superuser(),
            permissions = effective.permissions().len(),
            "resolved effective permissions"
        );
        Ok(effective)
    }

    /// decide whether the acting subject satisfies a condition.
    ///
    /// fetches the subject's grants from the source, resolves them, and
    /// evaluates the condition. Fails only if the source fails; a failed
    /// check is the [`Decision::Denied`] value, not an error.
    pub fn authorize<S>(
        &self,
        source: &S,
        condition: &Condition,
        ctx: &AccessContext,
    ) -> Result<Decision>
    where
        S: SubjectPermissionSource + ?Sized,
    {
        let effective = self.effective_permissions(source, ctx.subject())?;
        Ok(self.authorize_resolved(&effective, condition, ctx))
    }

    /// decide using already-resolved effective permissions.
    ///
    /// this is the per-request cache path: no fetch occurs and nothing can
    /// fail. The caller is responsible for only reusing permissions
    /// resolved for the same subject within the same request.
    pub fn authorize_resolved(
        &self,
        effective: &EffectivePermissions,
        condition: &Condition,
        ctx: &AccessContext,
    ) -> Decision {
        if condition.evaluate(effective, ctx) {
            Decision::Granted
        } else {
            debug!(subject = %ctx.subject(), "authorization denied");
            Decision::Denied
        }
    }
}

impl Clone for AuthzEngine {
    fn clone(&self) -> Self {
        Self {
            hierarchy: Arc::clone(&self.hierarchy),
        }
    }
}

/// outcome of an authorization check.
///
/// denial is an expected value rather than an error, and deliberately
/// carries no detail about which sub-condition failed: callers that need
/// an audit trail log the whole condition and context themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// the condition is satisfied.
    Granted,
    /// the condition is not satisfied.
    Denied,
}

impl Decision {
    /// returns `true` if access was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// returns `true` if access was denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied)
    }
}
