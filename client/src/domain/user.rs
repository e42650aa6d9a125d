//! User identity as reported by the access-management layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Group claim that selects the administrative todo view.
pub const OPERATOR_GROUP: &str = "sre";

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameValidationError {
    /// Username was missing or blank once trimmed.
    Empty,
    /// Username contained characters that would break URL path interpolation.
    InvalidCharacters,
}

impl fmt::Display for UsernameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "username must not be empty"),
            Self::InvalidCharacters => write!(
                f,
                "username must not contain whitespace, '/', '?', '#', or '%'"
            ),
        }
    }
}

impl std::error::Error for UsernameValidationError {}

/// Validated username.
///
/// ## Invariants
/// - Trimmed and non-empty.
/// - Free of characters that would alter the `/todos/{username}` path the
///   admin view interpolates it into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`] from borrowed input.
    pub fn new(username: impl AsRef<str>) -> Result<Self, UsernameValidationError> {
        Self::from_owned(username.as_ref().trim().to_owned())
    }

    fn from_owned(username: String) -> Result<Self, UsernameValidationError> {
        if username.is_empty() {
            return Err(UsernameValidationError::Empty);
        }
        if username
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%'))
        {
            return Err(UsernameValidationError::InvalidCharacters);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Role derived from group claims, selecting the active todo view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Member of the operator group: cross-user administrative view.
    Operator,
    /// Everyone else: self-service view.
    Member,
}

/// Identity payload returned by `GET /user`.
///
/// Both fields are optional on the wire: the gateway may answer with an empty
/// record, and views stay in a pending state until groups resolve. Equality is
/// derived so callers can detect an unchanged identity across refreshes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    /// Username asserted by the identity provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<Username>,
    /// Ordered group claims; `None` until the gateway reports them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
}

impl UserDetails {
    /// The empty record: no identity resolved yet.
    pub const fn empty() -> Self {
        Self {
            username: None,
            groups: None,
        }
    }

    /// Pure role predicate, re-derived on every render.
    ///
    /// Returns `None` while groups are unresolved; otherwise membership of
    /// [`OPERATOR_GROUP`] decides the view.
    pub fn role(&self) -> Option<Role> {
        self.groups.as_ref().map(|groups| {
            if groups.iter().any(|group| group == OPERATOR_GROUP) {
                Role::Operator
            } else {
                Role::Member
            }
        })
    }
}
