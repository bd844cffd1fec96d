use serde::Deserialize;
use serde::Serialize;

/// The data persisted into a session: who the request acts as, nothing else.
///
/// A session is a capability, not a credential cache. The struct is closed:
/// it carries the user id and the login identifier, and a password hash or
/// any other credential material has no field to land in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    /// Opaque user identifier
    pub user_id: String,

    /// Login identifier (email), kept for display and logging
    pub identifier: String,
}

impl SessionPayload {
    /// Project a user into its session payload.
    ///
    /// Total and pure: any user id and identifier produce a payload.
    ///
    /// # Arguments
    /// * `user_id` - Opaque user identifier
    /// * `identifier` - Login identifier
    ///
    /// # Returns
    /// SessionPayload with exactly those two fields
    pub fn for_user(user_id: impl ToString, identifier: impl ToString) -> Self {
        Self {
            user_id: user_id.to_string(),
            identifier: identifier.to_string(),
        }
    }
}
