use std::sync::Arc;
use std::time::Duration;

use auth::AuthenticationGate;
use auth::SessionCodec;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::federated::federated_login;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::register::register;
use super::handlers::secrets::get_secrets;
use super::middleware::require_session;
use crate::domain::auth::strategy::FederatedStrategy;
use crate::domain::auth::strategy::LocalStrategy;
use crate::domain::user::ports::UserStore;

pub struct AppState<S>
where
    S: UserStore,
{
    pub local: Arc<LocalStrategy<S>>,
    pub federated: Arc<FederatedStrategy<S>>,
    pub sessions: Arc<SessionCodec>,
    pub gate: Arc<AuthenticationGate>,
}

impl<S> Clone for AppState<S>
where
    S: UserStore,
{
    fn clone(&self) -> Self {
        Self {
            local: Arc::clone(&self.local),
            federated: Arc::clone(&self.federated),
            sessions: Arc::clone(&self.sessions),
            gate: Arc::clone(&self.gate),
        }
    }
}

pub fn create_router<S>(
    local: Arc<LocalStrategy<S>>,
    federated: Arc<FederatedStrategy<S>>,
    sessions: Arc<SessionCodec>,
    gate: Arc<AuthenticationGate>,
) -> Router
where
    S: UserStore,
{
    let state = AppState {
        local,
        federated,
        sessions,
        gate,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register::<S>))
        .route("/api/auth/login", post(login::<S>))
        .route("/api/auth/federated", post(federated_login::<S>))
        .route("/api/auth/logout", post(logout));

    let protected_routes = Router::new()
        .route("/api/secrets", get(get_secrets))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<S>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
