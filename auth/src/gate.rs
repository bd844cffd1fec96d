use std::sync::Arc;

use crate::session::SessionCodec;
use crate::session::SessionPayload;

/// Per-request admission decision over an encoded session.
///
/// A request is authenticated iff its session token decodes to a non-empty
/// identity. The gate performs no I/O and has no side effects; the only way
/// a request passes it is with a token the codec itself issued, and tokens
/// are only issued from successful authentication outcomes. There is no
/// path from unchecked client data to an admitted request.
///
/// Session lifetime as the gate sees it: anonymous until a strategy
/// authenticates, authenticated while the token verifies, anonymous again
/// once the token is dropped (logout) or expires.
pub struct AuthenticationGate {
    codec: Arc<SessionCodec>,
}

impl AuthenticationGate {
    /// Create a gate over the given session codec.
    pub fn new(codec: Arc<SessionCodec>) -> Self {
        Self { codec }
    }

    /// Decode the identity a request acts as, if any.
    ///
    /// # Arguments
    /// * `token` - Session token carried by the request, if present
    ///
    /// # Returns
    /// The session payload for a valid token, None for a missing, invalid,
    /// or expired one
    pub fn identity(&self, token: Option<&str>) -> Option<SessionPayload> {
        let token = token?;
        self.codec.decode(token).ok()
    }

    /// Whether the request is authenticated.
    pub fn is_authenticated(&self, token: Option<&str>) -> bool {
        self.identity(token).is_some()
    }
}
