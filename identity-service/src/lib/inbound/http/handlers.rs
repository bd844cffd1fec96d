use auth::SessionCodec;
use auth::SessionPayload;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::response::AppendHeaders;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::User;

pub mod federated;
pub mod login;
pub mod logout;
pub mod register;
pub mod secrets;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// The one message every rejected credential maps to, whatever the reason.
/// Distinguishing the sub-cases would let a caller enumerate identifiers.
pub const GENERIC_REJECTION: &str = "invalid username or password";

/// Headers establishing or clearing the session cookie.
pub type SessionHeaders = AppendHeaders<[(HeaderName, String); 1]>;

/// Build the Set-Cookie headers and token for an authenticated user.
///
/// Only called with a `User` a strategy or the registration path returned;
/// there is no route here from raw request input.
pub(crate) fn establish_session(
    sessions: &SessionCodec,
    user: &User,
) -> Result<(String, SessionHeaders), ApiError> {
    let payload = SessionPayload::for_user(user.id, user.identifier.as_str());

    let token = sessions.issue(&payload).map_err(|e| {
        tracing::error!(error = %e, "Failed to issue session token");
        ApiError::InternalServerError("Authentication failed".to_string())
    })?;

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token
    );

    Ok((token, AppendHeaders([(SET_COOKIE, cookie)])))
}

/// Headers that drop the session cookie.
pub(crate) fn clear_session() -> SessionHeaders {
    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    );
    AppendHeaders([(SET_COOKIE, cookie)])
}

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Response body shared by every session-establishing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionData {
    pub user: UserData,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub identifier: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            identifier: user.identifier.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
