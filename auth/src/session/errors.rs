use thiserror::Error;

/// Error type for session token operations.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Failed to issue session token: {0}")]
    IssueFailed(String),

    #[error("Session token is expired")]
    Expired,

    #[error("Session token is invalid: {0}")]
    Invalid(String),
}
