use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentSession;

/// The protected resource. Reachable only through the session middleware,
/// so the extension is always present here.
pub async fn get_secrets(
    Extension(session): Extension<CurrentSession>,
) -> ApiSuccess<SecretsResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        SecretsResponseData {
            user_id: session.user_id.to_string(),
            identifier: session.identifier,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretsResponseData {
    pub user_id: String,
    pub identifier: String,
}
