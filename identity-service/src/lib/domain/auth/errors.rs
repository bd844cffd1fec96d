use auth::PasswordError;
use thiserror::Error;

use crate::domain::user::errors::StoreError;

/// Internal failure during an authentication attempt.
///
/// Distinct from a rejection: a store or hasher failure must never be
/// silently treated as "bad credentials".
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
}

/// Error for the local registration path.
#[derive(Debug, Clone, Error)]
pub enum RegisterError {
    #[error("Identifier already registered: {0}")]
    DuplicateIdentifier(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for RegisterError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateIdentifier(identifier) => {
                RegisterError::DuplicateIdentifier(identifier)
            }
            other => RegisterError::Store(other),
        }
    }
}
