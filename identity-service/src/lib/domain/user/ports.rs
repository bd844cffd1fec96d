use async_trait::async_trait;

use crate::domain::user::errors::StoreError;
use crate::domain::user::models::Identifier;
use crate::domain::user::models::User;

/// Persistence operations for the user aggregate.
///
/// Uniqueness of `identifier` and `provider_key` belongs to the store: the
/// implementations resolve check-then-insert races with real constraints,
/// never with application-level checks.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Retrieve user by login identifier.
    ///
    /// # Arguments
    /// * `identifier` - Identifier to search for
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_identifier(&self, identifier: &Identifier)
        -> Result<Option<User>, StoreError>;

    /// Retrieve user by federated provider key.
    ///
    /// # Arguments
    /// * `key` - Provider-asserted subject identifier
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_provider_key(&self, key: &str) -> Result<Option<User>, StoreError>;

    /// Persist a locally registered user.
    ///
    /// # Arguments
    /// * `identifier` - Validated login identifier
    /// * `password_hash` - Hash produced by the password hasher, never a raw secret
    ///
    /// # Returns
    /// Created user entity with `password_hash` set
    ///
    /// # Errors
    /// * `DuplicateIdentifier` - Identifier is already registered
    /// * `Database` - Store operation failed
    async fn insert_local(
        &self,
        identifier: Identifier,
        password_hash: String,
    ) -> Result<User, StoreError>;

    /// Idempotent provisioning for a federated subject.
    ///
    /// Returns the existing user for `key` if present, else atomically
    /// creates one with no password. A concurrent identical create must
    /// resolve to the existing row, never to duplicate users for one
    /// subject.
    ///
    /// # Arguments
    /// * `key` - Provider-asserted subject identifier
    /// * `identifier` - Provider-asserted login identifier for a created row
    ///
    /// # Returns
    /// The user owning `key`
    ///
    /// # Errors
    /// * `DuplicateIdentifier` - A different account already owns `identifier`
    /// * `Database` - Store operation failed
    async fn find_or_create_federated(
        &self,
        key: &str,
        identifier: Identifier,
    ) -> Result<User, StoreError>;
}
