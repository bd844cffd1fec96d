use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::establish_session;
use super::ApiError;
use super::ApiSuccess;
use super::SessionData;
use super::SessionHeaders;
use crate::domain::auth::models::AuthOutcome;
use crate::domain::auth::models::ProviderIdentity;
use crate::domain::auth::strategy::AuthStrategy;
use crate::domain::user::models::Identifier;
use crate::domain::user::ports::UserStore;
use crate::inbound::http::router::AppState;

/// Post-exchange federated login.
///
/// The redirect and code/token exchange with the identity provider happen in
/// front of this endpoint; what arrives here is the assertion the provider
/// already validated. This handler only reconciles it with the user store.
pub async fn federated_login<S: UserStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<FederatedLoginRequestBody>,
) -> Result<(SessionHeaders, ApiSuccess<SessionData>), ApiError> {
    if body.subject.is_empty() {
        return Err(ApiError::UnprocessableEntity(
            "Provider subject must not be empty".to_string(),
        ));
    }

    let identifier = Identifier::new(body.email)
        .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid identifier: {}", e)))?;

    let identity = ProviderIdentity {
        subject: body.subject,
        identifier,
    };

    match state.federated.authenticate(identity).await {
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
            // The federated strategy has no credential to reject; reaching
            // this arm means the strategy contract changed underneath us.
            tracing::warn!(%reason, "Federated login rejected");
            Err(ApiError::Unauthorized(
                "Federated login rejected".to_string(),
            ))
        }
        Err(e) => {
            tracing::error!(error = %e, "Federated login failed");
            Err(ApiError::InternalServerError(
                "Authentication failed".to_string(),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FederatedLoginRequestBody {
    subject: String,
    email: String,
}
