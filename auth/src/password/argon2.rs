use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id) with a
/// configurable work factor. The cost is a memory exponent: hashing uses
/// 2^cost KiB of memory, so the work factor can be raised over time as
/// hardware improves. Hashes are emitted in PHC string format and embed
/// their own parameters and salt, so hashes produced under an older cost
/// keep verifying after the configured cost changes.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub const MIN_COST: u32 = 4;
    pub const MAX_COST: u32 = 31;

    /// Create a password hasher with the given cost factor.
    ///
    /// The cost must come from configuration, not from code, so it can be
    /// raised as hardware improves.
    ///
    /// # Arguments
    /// * `cost` - Memory exponent; hashing uses 2^cost KiB
    ///
    /// # Returns
    /// PasswordHasher configured with Argon2id and the derived parameters
    ///
    /// # Errors
    /// * `CostOutOfRange` - Cost is outside 4..=31
    /// * `HashingFailed` - Derived parameters were rejected by the algorithm
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        if !(Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            return Err(PasswordError::CostOutOfRange {
                min: Self::MIN_COST,
                max: Self::MAX_COST,
                actual: cost,
            });
        }

        let params = Params::new(
            1u32 << cost,
            Params::DEFAULT_T_COST,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password securely.
    ///
    /// Generates a fresh random salt per call, so two calls with the same
    /// input never produce identical output.
    ///
    /// # Arguments
    /// * `secret` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `EmptySecret` - Password is empty
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, secret: &str) -> Result<String, PasswordError> {
        if secret.is_empty() {
            return Err(PasswordError::EmptySecret);
        }

        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Recomputes with the parameters and salt embedded in the hash and
    /// compares in constant time. A mismatch is `Ok(false)`, never an error;
    /// only a hash that was not produced by `hash` fails.
    ///
    /// # Arguments
    /// * `secret` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid
    pub fn verify(&self, secret: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        match self.argon2.verify_password(secret.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}
