use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::errors::IdentifierError;
use crate::domain::user::errors::UserIdError;

/// User aggregate entity.
///
/// A user exists either because they registered locally (then
/// `password_hash` is set) or because a federated identity provider first
/// vouched for them (then `provider_key` is set and `password_hash` is
/// absent). The store enforces uniqueness of both `identifier` and
/// `provider_key`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub identifier: Identifier,
    pub password_hash: Option<String>,
    pub provider_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login identifier value type
///
/// The identifier users log in with. Validated as an email address using an
/// RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier(String);

impl Identifier {
    /// Create a new validated identifier.
    ///
    /// # Arguments
    /// * `identifier` - Raw identifier string
    ///
    /// # Returns
    /// Validated Identifier value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Identifier is not a well-formed email address
    pub fn new(identifier: String) -> Result<Self, IdentifierError> {
        email_address::EmailAddress::from_str(&identifier)
            .map(|_| Identifier(identifier))
            .map_err(|e| IdentifierError::InvalidFormat(e.to_string()))
    }

    /// Get identifier as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
