//! Authentication infrastructure library
//!
//! Provides the reusable authentication core for the identity service:
//! - Password hashing (Argon2id, configurable work factor)
//! - Session serialization into signed tokens and back
//! - The per-request authentication gate
//!
//! The service defines its own domain types and strategies and adapts these
//! implementations. Nothing in here performs I/O.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(12).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Sessions
//! ```
//! use auth::{SessionCodec, SessionPayload};
//!
//! let codec = SessionCodec::new(b"secret_key_at_least_32_bytes_long!", 24);
//! let token = codec.issue(&SessionPayload::for_user("user123", "alice@example.com")).unwrap();
//! let payload = codec.decode(&token).unwrap();
//! assert_eq!(payload.user_id, "user123");
//! ```
//!
//! ## Gating a request
//! ```
//! use std::sync::Arc;
//! use auth::{AuthenticationGate, SessionCodec, SessionPayload};
//!
//! let codec = Arc::new(SessionCodec::new(b"secret_key_at_least_32_bytes_long!", 24));
//! let gate = AuthenticationGate::new(Arc::clone(&codec));
//!
//! let token = codec.issue(&SessionPayload::for_user("user123", "alice@example.com")).unwrap();
//! assert!(gate.is_authenticated(Some(&token)));
//! assert!(!gate.is_authenticated(None));
//! ```

pub mod gate;
pub mod password;
pub mod session;

// Re-export commonly used items
pub use gate::AuthenticationGate;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session::SessionCodec;
pub use session::SessionError;
pub use session::SessionPayload;
