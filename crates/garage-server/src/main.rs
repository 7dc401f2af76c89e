use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use garage_db::{Database, DatabaseConfig};
use garage_server::config::ServerConfig;
use garage_server::routes;
use garage_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("garage=info".parse()?))
        .with_target(false)
        .init();

    let server = ServerConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let db = Database::connect(&db_config)
        .await
        .context("connecting to the catalog database")?;
    db.migrate().await.context("applying migrations")?;
    tracing::info!(max_connections = db_config.max_connections, "Database ready");

    let app = routes::app(Arc::new(AppState::new(db)));

    let listener = TcpListener::bind(server.addr)
        .await
        .with_context(|| format!("binding {}", server.addr))?;
    tracing::info!(addr = %listener.local_addr()?, "Garage API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Shutdown signal received, draining connections");
}
