use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use secrecy::ExposeSecret;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::RegisterError;
use crate::domain::auth::models::AuthOutcome;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::ProviderIdentity;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::RejectionReason;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserStore;

/// Polymorphic verification unit.
///
/// The implementors are exactly `LocalStrategy` and `FederatedStrategy`;
/// the caller picks one by the entry point the request arrived through.
/// Whatever the input shape, the output is the same `AuthOutcome`, so the
/// session layer never cares which strategy produced a user.
#[async_trait]
pub trait AuthStrategy: Send + Sync + 'static {
    /// The credential shape this strategy verifies.
    type Input: Send + 'static;

    /// Verify the input against the store.
    ///
    /// # Arguments
    /// * `input` - Strategy-specific credential material
    ///
    /// # Returns
    /// `Authenticated(User)` or `Rejected(reason)`
    ///
    /// # Errors
    /// * `AuthError` - Store or hasher failure; never conflated with a rejection
    async fn authenticate(&self, input: Self::Input) -> Result<AuthOutcome, AuthError>;
}

/// Verifies locally registered credentials: identifier lookup, then
/// constant-time password verification against the stored hash.
pub struct LocalStrategy<S>
where
    S: UserStore,
{
    store: Arc<S>,
    hasher: PasswordHasher,
}

impl<S> LocalStrategy<S>
where
    S: UserStore,
{
    /// Create a local strategy with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - User persistence implementation
    /// * `hasher` - Password hasher built from the configured cost factor
    pub fn new(store: Arc<S>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Register a new local user.
    ///
    /// The secret is hashed before anything is persisted and is dropped
    /// with the command when this returns. Duplicate identifiers are
    /// resolved by the store's uniqueness constraint, so a racing
    /// registration for the same identifier loses cleanly.
    ///
    /// # Arguments
    /// * `command` - Validated identifier and raw secret
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `DuplicateIdentifier` - Identifier is already registered
    /// * `Password` - Secret is empty or hashing failed
    /// * `Store` - Store operation failed
    pub async fn register(&self, command: RegisterCommand) -> Result<User, RegisterError> {
        let password_hash = self.hasher.hash(command.secret.expose_secret())?;

        let user = self
            .store
            .insert_local(command.identifier, password_hash)
            .await?;

        Ok(user)
    }
}

#[async_trait]
impl<S> AuthStrategy for LocalStrategy<S>
where
    S: UserStore,
{
    type Input = Credentials;

    async fn authenticate(&self, credentials: Credentials) -> Result<AuthOutcome, AuthError> {
        let user = match self
            .store
            .find_by_identifier(&credentials.identifier)
            .await?
        {
            Some(user) => user,
            None => return Ok(AuthOutcome::Rejected(RejectionReason::UnknownIdentifier)),
        };

        // Federated-only accounts have nothing to verify against.
        let password_hash = match user.password_hash.as_deref() {
            Some(hash) => hash,
            None => return Ok(AuthOutcome::Rejected(RejectionReason::NoPasswordSet)),
        };

        if self
            .hasher
            .verify(credentials.secret.expose_secret(), password_hash)?
        {
            Ok(AuthOutcome::Authenticated(user))
        } else {
            Ok(AuthOutcome::Rejected(RejectionReason::BadCredentials))
        }
    }
}

/// Reconciles a provider-asserted identity with the local user store.
///
/// There is no credential to verify here: the provider already vouched for
/// the subject. First federated login provisions the user (find-or-create);
/// this is the only path that produces a user without a password.
pub struct FederatedStrategy<S>
where
    S: UserStore,
{
    store: Arc<S>,
}

impl<S> FederatedStrategy<S>
where
    S: UserStore,
{
    /// Create a federated strategy over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> AuthStrategy for FederatedStrategy<S>
where
    S: UserStore,
{
    type Input = ProviderIdentity;

    async fn authenticate(&self, identity: ProviderIdentity) -> Result<AuthOutcome, AuthError> {
        if let Some(user) = self.store.find_by_provider_key(&identity.subject).await? {
            return Ok(AuthOutcome::Authenticated(user));
        }

        let user = self
            .store
            .find_or_create_federated(&identity.subject, identity.identifier)
            .await?;

        Ok(AuthOutcome::Authenticated(user))
    }
}
