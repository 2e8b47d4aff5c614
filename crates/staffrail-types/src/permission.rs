//! validated permission token type.
//!
//! permissions must:
//! - Be non-empty and at most 100 characters
//! - Contain only ascii alphanumerics, dots, hyphens and underscores
//!
//! the single reserved token `*` is the wildcard and is always valid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// maximum length of a permission token.
pub const MAX_PERMISSION_LEN: usize = 100;

/// the reserved wildcard token.
const WILDCARD: &str = "*";

/// suffix marking a token as ownership-qualified.
const OWN_SUFFIX: &str = "Own";

/// a validated permission token.
///
/// tokens are opaque, namespaced capability strings (e.g., `"user.edit"`).
/// they are case-sensitive and compared by exact string equality.
///
/// two token shapes carry extra meaning:
/// - `*` is the wildcard: an expanded set containing it grants everything.
/// - a token ending in `Own` (e.g., `"report.editOwn"`) is
///   ownership-qualified: holding it is necessary but not sufficient, the
///   acting subject must also own or be the target of the resource.
///
/// # Example
/// ```
/// use staffrail_types::Permission;
///
/// let perm: Permission = "user.editOwn".parse().unwrap();
/// assert_eq!(perm.as_str(), "user.editOwn");
/// assert!(perm.is_ownership_qualified());
/// assert!(!perm.is_wildcard());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permission(String);

impl Permission {
    /// create a new permission, validating the token format.
    pub fn new(s: impl Into<String>) -> Result<Self, PermissionError> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// the reserved wildcard token `*`.
    pub fn wildcard() -> Self {
        Self(WILDCARD.to_string())
    }

    /// get the token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// consume the permission and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// whether this is the reserved wildcard token.
    pub fn is_wildcard(&self) -> bool {
        self.0 == WILDCARD
    }

    /// whether this token is ownership-qualified (ends with `Own`).
    ///
    /// such a token only grants access when the acting subject is related
    /// to the specific resource being acted upon.
    pub fn is_ownership_qualified(&self) -> bool {
        self.0.ends_with(OWN_SUFFIX)
    }

    fn validate(s: &str) -> Result<(), PermissionError> {
        if s == WILDCARD {
            return Ok(());
        }

        if s.is_empty() {
            return Err(PermissionError::Empty);
        }

        if s.len() > MAX_PERMISSION_LEN {
            return Err(PermissionError::TooLong(s.len()));
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
        {
            return Err(PermissionError::InvalidCharacters);
        }

        Ok(())
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// hashes identically to the inner string, so sets of permissions can be
// probed with a &str without allocating
impl std::borrow::Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Permission {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Permission {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Permission {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// serde: deserialize with validation
impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Permission::new(s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Permission {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

/// error type for permission validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// permission token cannot be empty.
    Empty,
    /// permission token exceeds maximum length.
    TooLong(usize),
    /// permission token contains invalid characters.
    InvalidCharacters,
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionError::Empty => write!(f, "permission token cannot be empty"),
            PermissionError::TooLong(len) => {
                write!(
                    f,
                    "permission token too long ({} chars, max {})",
                    len, MAX_PERMISSION_LEN
                )
            }
            PermissionError::InvalidCharacters => {
                write!(
                    f,
                    "permission token must be ascii alphanumeric with dots, hyphens or underscores"
                )
            }
        }
    }
}

impl std::error::Error for PermissionError {}
