//! # Taskboard API Server
//!
//! Task-management REST API: users, projects and tasks over a single-file
//! SQLite store.
//!
//! ## Startup
//!
//! 1. Load configuration from the environment (and `.env`)
//! 2. Open the store and create any missing tables; failure here exits
//!    before the listener is bound
//! 3. Serve until Ctrl-C, then drain requests and close the store
//!
//! ## Usage
//!
//! ```bash
//! PORT=3000 DATABASE_PATH=database/tasks.db cargo run -p taskboard-api
//! ```

use taskboard_api::{
    app::{build_router, AppState},
    config::{Config, LogFormat},
};
use taskboard_shared::db::{pool, schema};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_tracing(config.log.format);

    tracing::info!(
        "Taskboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let db = pool::create_pool(config.store_config()).await?;

    let status = schema::ensure_schema(&db).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize database");
        e
    })?;
    tracing::info!(tables = ?status.present, "Database schema ready");

    let bind_address = config.bind_address();
    let state = AppState::new(db.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);
    tracing::info!("Health check: http://{}/health", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db).await;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "taskboard_api=debug,taskboard_shared=info,tower_http=debug".into()
            }),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler, keep serving until the process is killed
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
