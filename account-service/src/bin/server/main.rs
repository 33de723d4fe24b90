use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::user::service::AuthService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::database;
use account_service::outbound::repositories::PostgresUserRepository;
use account_service::outbound::sessions::spawn_expiry_sweep;
use account_service::outbound::sessions::SessionBackend;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
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
        database_host = %config.database.host,
        database_port = config.database.port,
        database_name = %config.database.name,
        ssl_mode = %config.database.ssl_mode,
        http_port = config.server.http_port,
        session_store = ?config.session.store,
        "Configuration loaded"
    );

    let pg_pool = database::create_pool(&config.database)?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    match database::migrate(&pg_pool).await {
        Ok(()) => tracing::info!(database = "postgresql", "Database migrations completed"),
        Err(e) => tracing::error!(
            error = %e,
            database = "postgresql",
            "Database migrations failed, account operations will fail until the database is reachable"
        ),
    }

    let session_store = SessionBackend::select(config.session.store, &pg_pool).await;
    let sweep = spawn_expiry_sweep(session_store.clone(), config.session.sweep_interval());
    tracing::info!(
        store = session_store.name(),
        interval_secs = config.session.sweep_interval_secs,
        "Session expiry sweep scheduled"
    );

    let password_hasher = config.password.hasher()?;
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let auth_service = Arc::new(AuthService::new(user_repository, password_hasher));

    let http_address = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        auth_service,
        session_store,
        &config.session,
        &config.server.login_path,
    );

    let served = axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    sweep.abort();
    pg_pool.close().await;

    match served {
        Ok(()) => tracing::info!("Server exited successfully"),
        Err(ref e) => tracing::error!(error = %e, "Server error"),
    };

    served.map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
