use auth::PasswordError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

use super::establish_session;
use super::ApiError;
use super::ApiSuccess;
use super::SessionData;
use super::SessionHeaders;
use crate::domain::auth::errors::RegisterError;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::user::errors::IdentifierError;
use crate::domain::user::models::Identifier;
use crate::domain::user::ports::UserStore;
use crate::inbound::http::router::AppState;

pub async fn register<S: UserStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<(SessionHeaders, ApiSuccess<SessionData>), ApiError> {
    let command = body.try_into_command()?;

    let user = state.local.register(command).await.map_err(|e| match e {
        RegisterError::DuplicateIdentifier(_) => ApiError::Conflict(e.to_string()),
        RegisterError::Password(PasswordError::EmptySecret) => {
            ApiError::UnprocessableEntity("Password must not be empty".to_string())
        }
        RegisterError::Password(err) => {
            tracing::error!(error = %err, "Password hashing failed during registration");
            ApiError::InternalServerError("Registration failed".to_string())
        }
        RegisterError::Store(err) => {
            tracing::error!(error = %err, "Store failure during registration");
            ApiError::InternalServerError("Registration failed".to_string())
        }
    })?;

    // Registration logs the user straight in; the session comes from the
    // user row the store returned, never from the request body.
    let (token, headers) = establish_session(&state.sessions, &user)?;

    Ok((
        headers,
        ApiSuccess::new(
            StatusCode::CREATED,
            SessionData {
                user: (&user).into(),
                token,
            },
        ),
    ))
}

/// HTTP request body for local registration (raw JSON)
#[derive(Debug, Deserialize)]
pub struct RegisterRequestBody {
    username: String,
    password: SecretString,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid identifier: {0}")]
    Identifier(#[from] IdentifierError),
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let identifier = Identifier::new(self.username)?;
        Ok(RegisterCommand::new(identifier, self.password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
