use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::AuthenticationGate;
use auth::PasswordHasher;
use auth::SessionCodec;
use chrono::Utc;
use identity_service::domain::auth::strategy::FederatedStrategy;
use identity_service::domain::auth::strategy::LocalStrategy;
use identity_service::domain::user::errors::StoreError;
use identity_service::domain::user::models::Identifier;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::ports::UserStore;
use identity_service::inbound::http::router::create_router;

pub const TEST_SESSION_SECRET: &[u8] = b"test-secret-key-for-session-signing-32b!";

// Cheap cost so the suite stays fast.
pub const TEST_PASSWORD_COST: u32 = 8;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

/// In-memory user store with the same uniqueness semantics the database
/// constraints provide.
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().expect("poisoned");
        Ok(users
            .iter()
            .find(|u| u.identifier == *identifier)
            .cloned())
    }

    async fn find_by_provider_key(&self, key: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().expect("poisoned");
        Ok(users
            .iter()
            .find(|u| u.provider_key.as_deref() == Some(key))
            .cloned())
    }

    async fn insert_local(
        &self,
        identifier: Identifier,
        password_hash: String,
    ) -> Result<User, StoreError> {
        let mut users = self.users.lock().expect("poisoned");

        if users.iter().any(|u| u.identifier == identifier) {
            return Err(StoreError::DuplicateIdentifier(
                identifier.as_str().to_string(),
            ));
        }

        let user = User {
            id: UserId::new(),
            identifier,
            password_hash: Some(password_hash),
            provider_key: None,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_or_create_federated(
        &self,
        key: &str,
        identifier: Identifier,
    ) -> Result<User, StoreError> {
        let mut users = self.users.lock().expect("poisoned");

        if let Some(user) = users.iter().find(|u| u.provider_key.as_deref() == Some(key)) {
            return Ok(user.clone());
        }

        if users.iter().any(|u| u.identifier == identifier) {
            return Err(StoreError::DuplicateIdentifier(
                identifier.as_str().to_string(),
            ));
        }

        let user = User {
            id: UserId::new(),
            identifier,
            password_hash: None,
            provider_key: Some(key.to_string()),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let store = Arc::new(InMemoryUserStore::new());

        let hasher = PasswordHasher::new(TEST_PASSWORD_COST).expect("Failed to build hasher");
        let sessions = Arc::new(SessionCodec::new(TEST_SESSION_SECRET, 24));
        let gate = Arc::new(AuthenticationGate::new(Arc::clone(&sessions)));

        let local = Arc::new(LocalStrategy::new(Arc::clone(&store), hasher));
        let federated = Arc::new(FederatedStrategy::new(Arc::clone(&store)));

        let router = create_router(local, federated, Arc::clone(&sessions), gate);

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().expect("Missing local addr").port();
        let address = format!("http://127.0.0.1:{}", port);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}
