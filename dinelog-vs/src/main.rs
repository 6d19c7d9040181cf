//! dinelog-vs (Visit Service) - Main entry point
//!
//! Serves the visit store over HTTP:
//! - `GET /api/restaurants`
//! - `POST /api/restaurants`
//! - `GET /health`

use anyhow::{Context, Result};
use clap::Parser;
use dinelog_common::config::TomlConfig;
use dinelog_common::db::init_database;
use dinelog_vs::config::{Args, Config};
use dinelog_vs::{bind, build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let loaded = TomlConfig::load(args.config.as_deref());
    let log_level = TomlConfig::log_level_of(&loaded);

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("dinelog_vs={0},dinelog_common={0},tower_http=info", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let toml = TomlConfig::or_warn_default(loaded);
    let config = Config::resolve(&args, &toml);

    info!(
        "Starting dinelog Visit Service (dinelog-vs) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Root folder: {}", config.root_folder.display());

    let pool = match init_database(&config.db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database {}: {}", config.db_path.display(), e);
            return Err(e.into());
        }
    };

    let app = build_router(AppState::new(pool.clone()));

    let address = config.address();
    let (listener, local) = bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("dinelog-vs listening on http://{}", local);
    info!("Health check: http://{}/health", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
