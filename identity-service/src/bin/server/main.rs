use std::sync::Arc;

use auth::AuthenticationGate;
use auth::PasswordHasher;
use auth::SessionCodec;
use identity_service::config::Config;
use identity_service::domain::auth::strategy::FederatedStrategy;
use identity_service::domain::auth::strategy::LocalStrategy;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::PostgresUserStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        password_cost = config.password.cost,
        session_expiration_hours = config.session.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let store = Arc::new(PostgresUserStore::new(pg_pool));
    let hasher = PasswordHasher::new(config.password.cost)?;
    let sessions = Arc::new(SessionCodec::new(
        config.session.secret.as_bytes(),
        config.session.expiration_hours,
    ));
    let gate = Arc::new(AuthenticationGate::new(Arc::clone(&sessions)));

    let local = Arc::new(LocalStrategy::new(Arc::clone(&store), hasher));
    let federated = Arc::new(FederatedStrategy::new(store));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(local, federated, sessions, gate);
    axum::serve(listener, application).await?;

    Ok(())
}
