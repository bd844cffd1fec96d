use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::SessionError;
use super::payload::SessionPayload;

/// Wire shape of an issued session: the payload plus the timestamps the
/// transport needs. Private so nothing beyond the payload fields can be
/// written into a session from outside this module.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    identifier: String,
    iat: i64,
    exp: i64,
}

/// Converts an authenticated user's session payload to and from its signed
/// client-held representation.
///
/// Tokens are HMAC-signed (HS256), so the payload lives client-side but is
/// not client-mutable without detection. Decoding does not consult any
/// store: the decoded identity is trusted as-is for the life of the session.
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl_hours: i64,
}

impl SessionCodec {
    /// Create a session codec.
    ///
    /// # Arguments
    /// * `secret` - Signing key; should be at least 256 bits and never live in code
    /// * `ttl_hours` - Hours until an issued session expires
    ///
    /// # Returns
    /// SessionCodec configured with HS256
    pub fn new(secret: &[u8], ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl_hours,
        }
    }

    /// Serialize a session payload into a signed token.
    ///
    /// # Arguments
    /// * `payload` - Identity projection to persist into the session
    ///
    /// # Returns
    /// Compact signed token string
    ///
    /// # Errors
    /// * `IssueFailed` - Token encoding failed
    pub fn issue(&self, payload: &SessionPayload) -> Result<String, SessionError> {
        let now = Utc::now();
        let expires = now + Duration::hours(self.ttl_hours);

        let claims = SessionClaims {
            sub: payload.user_id.clone(),
            identifier: payload.identifier.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| SessionError::IssueFailed(e.to_string()))
    }

    /// Deserialize and validate a token back into its session payload.
    ///
    /// Verifies the signature and the expiry; returns the identity
    /// reference without re-fetching user state.
    ///
    /// # Arguments
    /// * `token` - Compact signed token string
    ///
    /// # Returns
    /// The session payload the token was issued for
    ///
    /// # Errors
    /// * `Expired` - Token is past its expiry
    /// * `Invalid` - Signature is invalid or the token is malformed
    pub fn decode(&self, token: &str) -> Result<SessionPayload, SessionError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => SessionError::Expired,
                    _ => SessionError::Invalid(e.to_string()),
                }
            })?;

        Ok(SessionPayload {
            user_id: token_data.claims.sub,
            identifier: token_data.claims.identifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-for-session-signing-32b!";

    #[test]
    fn test_issue_and_decode() {
        let codec = SessionCodec::new(SECRET, 24);
        let payload = SessionPayload::for_user("user123", "alice@example.com");

        let token = codec.issue(&payload).expect("Failed to issue token");
        assert!(!token.is_empty());

        let decoded = codec.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_decode_garbage() {
        let codec = SessionCodec::new(SECRET, 24);
        let result = codec.decode("not.a.token");
        assert!(matches!(result, Err(SessionError::Invalid(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let issuer = SessionCodec::new(SECRET, 24);
        let other = SessionCodec::new(b"a-different-secret-of-32-bytes-min!!", 24);

        let token = issuer
            .issue(&SessionPayload::for_user("user123", "alice@example.com"))
            .expect("Failed to issue token");

        assert!(matches!(
            other.decode(&token),
            Err(SessionError::Invalid(_))
        ));
    }

    #[test]
    fn test_decode_tampered_token() {
        let codec = SessionCodec::new(SECRET, 24);
        let token = codec
            .issue(&SessionPayload::for_user("user123", "alice@example.com"))
            .expect("Failed to issue token");

        // Flip a character in the payload segment.
        let mut tampered: Vec<String> = token.split('.').map(String::from).collect();
        tampered[1] = tampered[1].replace('a', "b");
        let tampered = tampered.join(".");

        assert!(codec.decode(&tampered).is_err());
    }

    #[test]
    fn test_decode_expired_token() {
        // Negative TTL issues a token that expired an hour ago, well past
        // the validation leeway.
        let codec = SessionCodec::new(SECRET, -1);
        let token = codec
            .issue(&SessionPayload::for_user("user123", "alice@example.com"))
            .expect("Failed to issue token");

        assert!(matches!(codec.decode(&token), Err(SessionError::Expired)));
    }

    #[test]
    fn test_token_claims_carry_no_credential_material() {
        let codec = SessionCodec::new(SECRET, 24);
        let token = codec
            .issue(&SessionPayload::for_user("user123", "alice@example.com"))
            .expect("Failed to issue token");

        // Inspect the raw claims without signature validation.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.required_spec_claims.clear();

        let claims =
            decode::<serde_json::Value>(&token, &DecodingKey::from_secret(SECRET), &validation)
                .expect("Failed to inspect token")
                .claims;

        let object = claims.as_object().expect("Claims are not a JSON object");
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["exp", "iat", "identifier", "sub"]);
    }
}
