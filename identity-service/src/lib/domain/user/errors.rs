use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Identifier validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Invalid identifier format: {0}")]
    InvalidFormat(String),
}

/// Error for user store operations.
///
/// Uniqueness violations get their own variants because the strategies treat
/// them as domain outcomes rather than infrastructure failures.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Identifier already exists: {0}")]
    DuplicateIdentifier(String),

    #[error("Provider key already exists: {0}")]
    DuplicateProviderKey(String),

    #[error("Database error: {0}")]
    Database(String),
}
