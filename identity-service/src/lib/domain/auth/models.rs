use std::fmt;

use secrecy::SecretString;

use crate::domain::user::models::Identifier;
use crate::domain::user::models::User;

/// Transient login credentials.
///
/// Never persisted as given; the secret is zeroized on drop, so it is
/// unreachable once verification or hashing returns.
#[derive(Debug)]
pub struct Credentials {
    pub identifier: Identifier,
    pub secret: SecretString,
}

/// Command to register a new local user.
#[derive(Debug)]
pub struct RegisterCommand {
    pub identifier: Identifier,
    pub secret: SecretString,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `identifier` - Validated login identifier
    /// * `secret` - Plain text password (hashed by the strategy, then dropped)
    pub fn new(identifier: Identifier, secret: SecretString) -> Self {
        Self { identifier, secret }
    }
}

/// Identity asserted by an external identity provider.
///
/// The redirect/code-exchange/token-validation flow happens outside this
/// core; by the time this value exists the provider has already vouched for
/// the subject.
#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    /// Stable subject identifier at the provider
    pub subject: String,

    /// Provider-asserted login identifier
    pub identifier: Identifier,
}

/// Uniform outcome of any authentication strategy.
///
/// Infrastructure failures travel separately as errors; a rejection is a
/// domain outcome, not a failure.
#[derive(Debug)]
pub enum AuthOutcome {
    Authenticated(User),
    Rejected(RejectionReason),
}

/// Why an authentication attempt was rejected.
///
/// For logging only. The HTTP edge collapses every variant into one generic
/// message so identifiers cannot be enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    UnknownIdentifier,
    NoPasswordSet,
    BadCredentials,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RejectionReason::UnknownIdentifier => "no such identifier",
            RejectionReason::NoPasswordSet => "no password set",
            RejectionReason::BadCredentials => "bad credentials",
        };
        f.write_str(reason)
    }
}
