//! permission conditions and their evaluation.
//!
//! a condition is the boolean requirement a caller attaches to a privileged
//! operation: a single token, or an any/all combination of nested
//! conditions. Conditions are built by callers and consumed read-only.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use staffrail_types::{Permission, SubjectId};

use crate::effective::EffectivePermissions;

/// a recursive permission requirement.
///
/// serializes as a bare token string for leaves and a single-key object
/// for combinators:
///
/// ```json
/// {"any": ["user.edit", {"all": ["attendance.view", "attendance.editOwn"]}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// the subject must hold this token.
    ///
    /// if the token is ownership-qualified (`Own` suffix), the subject must
    /// additionally own or be the target of the resource in context.
    Has(Permission),
    /// at least one child condition must hold. An empty list never holds.
    Any(Vec<Condition>),
    /// every child condition must hold. An empty list always holds.
    All(Vec<Condition>),
}

impl Condition {
    /// evaluate this condition against a subject's effective permissions
    /// and the per-check access context.
    ///
    /// unrestricted subjects (role superuser, or `*` in the effective set)
    /// pass every condition shape, including ownership-qualified leaves
    /// and empty combinators.
    pub fn evaluate(&self, effective: &EffectivePermissions, ctx: &AccessContext) -> bool {
        if effective.is_unrestricted() {
            return true;
        }

        match self {
            Condition::Has(permission) => {
                let held = effective.permissions().contains(permission);
                if permission.is_ownership_qualified() {
                    held && ctx.is_owner()
                } else {
                    held
                }
            }
            // any/all short-circuit; the empty cases fall out of the
            // iterator semantics (no child passes / no child fails)
            Condition::Any(children) => children.iter().any(|c| c.evaluate(effective, ctx)),
            Condition::All(children) => children.iter().all(|c| c.evaluate(effective, ctx)),
        }
    }
}

impl From<Permission> for Condition {
    fn from(permission: Permission) -> Self {
        Condition::Has(permission)
    }
}

impl Serialize for Condition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Condition::Has(permission) => serializer.serialize_str(permission.as_str()),
            Condition::Any(children) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("any", children)?;
                map.end()
            }
            Condition::All(children) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("all", children)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ConditionVisitor;

        impl<'de> Visitor<'de> for ConditionVisitor {
            type Value = Condition;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a permission token or an object with a single \"any\" or \"all\" key")
            }

            fn visit_str<E>(self, v: &str) -> Result<Condition, E>
            where
                E: de::Error,
            {
                let permission = Permission::new(v).map_err(E::custom)?;
                Ok(Condition::Has(permission))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Condition, A::Error>
            where
                A: MapAccess<'de>,
            {
                let key: String = map
                    .next_key()?
                    .ok_or_else(|| de::Error::custom("combinator object cannot be empty"))?;
                let children: Vec<Condition> = map.next_value()?;
                if map.next_key::<String>()?.is_some() {
                    return Err(de::Error::custom(
                        "combinator object must have a single key",
                    ));
                }
                match key.as_str() {
                    "any" => Ok(Condition::Any(children)),
                    "all" => Ok(Condition::All(children)),
                    other => Err(de::Error::unknown_field(other, &["any", "all"])),
                }
            }
        }

        deserializer.deserialize_any(ConditionVisitor)
    }
}

/// per-check context: who is acting, and on whose resource.
///
/// the optional ids only matter for ownership-qualified tokens; with
/// neither set, ownership can never be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessContext {
    subject: SubjectId,
    target_user: Option<SubjectId>,
    resource_owner: Option<SubjectId>,
}

impl AccessContext {
    /// create a context for the given acting subject, with no resource
    /// relation.
    pub fn new(subject: SubjectId) -> Self {
        Self {
            subject,
            target_user: None,
            resource_owner: None,
        }
    }

    /// set the user the operation targets (e.g., whose record is edited).
    pub fn with_target_user(mut self, target_user: SubjectId) -> Self {
        self.target_user = Some(target_user);
        self
    }

    /// set the owner of the resource the operation touches.
    pub fn with_resource_owner(mut self, resource_owner: SubjectId) -> Self {
        self.resource_owner = Some(resource_owner);
        self
    }

    /// the acting subject.
    pub fn subject(&self) -> SubjectId {
        self.subject
    }

    /// whether the acting subject is the target user or the resource owner.
    pub fn is_owner(&self) -> bool {
        self.target_user == Some(self.subject) || self.resource_owner == Some(self.subject)
    }
}
