// crates/server/src/main.rs
//! Timesheet server binary.
//!
//! Opens (backing up and migrating as needed) the SQLite store, then serves
//! the API and UI until Ctrl-C or SIGTERM.

use anyhow::{Context, Result};
use timesheet_db::Database;
use timesheet_server::{create_app, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "timesheet_server=info,timesheet_db=info,tower_http=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    // Prints help/version or the usage error and exits.
    let config = ServerConfig::try_from_args(std::env::args_os()).unwrap_or_else(|e| e.exit());

    if let Err(e) = run(config).await {
        tracing::error!(error = %format!("{e:#}"), "Server failed");
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<()> {
    tracing::info!(
        db = %config.db_path.display(),
        addr = %config.socket_addr(),
        "Loaded server configuration"
    );

    let db = Database::new(&config.db_path)
        .await
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;

    let app = create_app(db);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Timesheet listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
