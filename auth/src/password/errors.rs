use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    EmptySecret,

    #[error("Cost factor out of range: expected {min}..={max}, got {actual}")]
    CostOutOfRange { min: u32, max: u32, actual: u32 },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
