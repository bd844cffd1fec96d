use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserStore;
use crate::inbound::http::handlers::SESSION_COOKIE;
use crate::inbound::http::router::AppState;

/// Extension type carrying the identity a request acts as.
///
/// Trusted as-is for the life of the session; no store re-fetch per request.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub user_id: UserId,
    pub identifier: String,
}

/// Middleware admitting only authenticated requests.
///
/// The token may arrive in the session cookie or as a bearer header. Every
/// failure mode (missing, malformed, expired, bad signature) collapses into
/// the same 401.
pub async fn require_session<S: UserStore>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token(&req);

    let payload = match state.gate.identity(token.as_deref()) {
        Some(payload) => payload,
        None => {
            tracing::debug!("Request carried no valid session");
            return Err(unauthorized());
        }
    };

    let user_id = UserId::from_string(&payload.user_id).map_err(|e| {
        tracing::error!(error = %e, "Session payload carried a malformed user id");
        unauthorized()
    })?;

    req.extensions_mut().insert(CurrentSession {
        user_id,
        identifier: payload.identifier,
    });

    Ok(next.run(req).await)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Not authenticated"
        })),
    )
        .into_response()
}

fn extract_token(req: &Request) -> Option<String> {
    bearer_token(req).or_else(|| cookie_token(req))
}

fn bearer_token(req: &Request) -> Option<String> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    header.strip_prefix("Bearer ").map(str::to_string)
}

fn cookie_token(req: &Request) -> Option<String> {
    let header = req.headers().get(http::header::COOKIE)?.to_str().ok()?;

    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with_header(name: http::HeaderName, value: &str) -> Request {
        Request::builder()
            .header(name, value)
            .body(Body::empty())
            .expect("Failed to build request")
    }

    #[test]
    fn test_bearer_token_extraction() {
        let req = request_with_header(http::header::AUTHORIZATION, "Bearer abc.def.ghi");
        assert_eq!(extract_token(&req), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_cookie_token_extraction() {
        let req = request_with_header(http::header::COOKIE, "theme=dark; session=abc.def.ghi");
        assert_eq!(extract_token(&req), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_bearer_takes_precedence_over_cookie() {
        let req = Request::builder()
            .header(http::header::AUTHORIZATION, "Bearer from-header")
            .header(http::header::COOKIE, "session=from-cookie")
            .body(Body::empty())
            .expect("Failed to build request");

        assert_eq!(extract_token(&req), Some("from-header".to_string()));
    }

    #[test]
    fn test_no_token() {
        let req = Request::builder()
            .body(Body::empty())
            .expect("Failed to build request");

        assert_eq!(extract_token(&req), None);
    }
}
