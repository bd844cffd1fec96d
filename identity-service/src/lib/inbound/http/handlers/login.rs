use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use secrecy::SecretString;
use serde::Deserialize;

use super::establish_session;
use super::ApiError;
use super::ApiSuccess;
use super::SessionData;
use super::SessionHeaders;
use super::GENERIC_REJECTION;
use crate::domain::auth::models::AuthOutcome;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::strategy::AuthStrategy;
use crate::domain::user::models::Identifier;
use crate::domain::user::ports::UserStore;
use crate::inbound::http::router::AppState;

pub async fn login<S: UserStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<LoginRequestBody>,
) -> Result<(SessionHeaders, ApiSuccess<SessionData>), ApiError> {
    // An identifier that does not parse cannot exist in the store, so it is
    // the same rejection as an unknown one.
    let identifier = Identifier::new(body.username)
        .map_err(|_| ApiError::Unauthorized(GENERIC_REJECTION.to_string()))?;

    let credentials = Credentials {
        identifier,
        secret: body.password,
    };

    match state.local.authenticate(credentials).await {
        Ok(AuthOutcome::Authenticated(user)) => {
            let (token, headers) = establish_session(&state.sessions, &user)?;
            Ok((
                headers,
                ApiSuccess::new(
                    StatusCode::OK,
                    SessionData {
                        user: (&user).into(),
                        token,
                    },
                ),
            ))
        }
        Ok(AuthOutcome::Rejected(reason)) => {
            // The reason stays in the logs; the client sees one message.
            tracing::info!(%reason, "Login rejected");
            Err(ApiError::Unauthorized(GENERIC_REJECTION.to_string()))
        }
        Err(e) => {
            tracing::error!(error = %e, "Login attempt failed");
            Err(ApiError::InternalServerError(
                "Authentication failed".to_string(),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: SecretString,
}
