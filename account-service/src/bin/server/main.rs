use std::sync::Arc;

use account_service::config::Config;
use account_service::config::RECOMMENDED_SECRET_LENGTH;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::cors_layer;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::session::SessionCookiePolicy;
use account_service::outbound::repositories::PostgresAccountRepository;
use auth::Authenticator;
use auth::SystemClock;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        environment = %config.environment,
        http_port = config.server.http_port,
        cors_origin = %config.server.cors_origin,
        password_algorithm = ?config.password.algorithm,
        "Configuration loaded"
    );

    for token_kind in config.jwt.weak_secrets() {
        tracing::warn!(
            token_kind,
            recommended_length = RECOMMENDED_SECRET_LENGTH,
            "Signing secret is shorter than recommended"
        );
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.token_config()?,
        Arc::new(SystemClock),
    ));
    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool));
    let account_service = Arc::new(AccountService::new(
        account_repository,
        config.password.hasher(),
    ));

    let http_application = create_router(
        account_service,
        authenticator,
        SessionCookiePolicy::new(config.is_production()),
        cors_layer(&config.server.cors_origin)?,
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
