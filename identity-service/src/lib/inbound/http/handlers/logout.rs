use axum::http::StatusCode;
use serde::Serialize;

use super::clear_session;
use super::ApiSuccess;
use super::SessionHeaders;

/// Drop the session cookie.
///
/// Public route: clearing an absent session is a no-op, and an expired
/// session must still be clearable.
pub async fn logout() -> (SessionHeaders, ApiSuccess<LogoutResponseData>) {
    (
        clear_session(),
        ApiSuccess::new(
            StatusCode::OK,
            LogoutResponseData {
                message: "logged out".to_string(),
            },
        ),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
