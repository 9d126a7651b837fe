use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::SigningSecret;
use session_service::config::Config;
use session_service::domain::session::guard::AccessGuard;
use session_service::domain::session::models::Role;
use session_service::domain::session::ports::AuthServicePort;
use session_service::domain::session::service::AuthService;
use session_service::inbound::http::router::create_router;
use session_service::inbound::http::session::CookieSettings;
use session_service::outbound::repositories::InMemoryUserStore;
use session_service::outbound::repositories::PostgresUserStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "session-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database = config.database.is_some(),
        session_ttl_minutes = config.session.ttl_minutes,
        cookie_name = %config.session.cookie_name,
        secure_cookie = config.session.secure_cookie,
        "Configuration loaded"
    );

    let secret = SigningSecret::new(&config.jwt.secret)
        .context("jwt.secret must be set (JWT__SECRET or JWT_SECRET_KEY)")?;
    let authenticator = Arc::new(Authenticator::new(&secret, config.session.ttl()?));

    let auth_service: Arc<dyn AuthServicePort> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let store = Arc::new(PostgresUserStore::new(pg_pool));
            Arc::new(AuthService::new(store, Arc::clone(&authenticator)))
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory and lost on restart");
            let store = Arc::new(InMemoryUserStore::new());
            Arc::new(AuthService::new(store, Arc::clone(&authenticator)))
        }
    };

    let guard = Arc::new(AccessGuard::new(authenticator, Role::ALL));
    let cookies = CookieSettings::new(
        config.session.cookie_name.clone(),
        config.session.secure_cookie,
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, guard, cookies);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
