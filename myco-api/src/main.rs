//! myco-api - Mushroom catalog and sighting report service
//!
//! Startup sequence:
//! 1. Parse arguments and load the TOML bootstrap file
//! 2. Initialize tracing
//! 3. Open the store (and optionally seed it)
//! 4. Serve until Ctrl+C / SIGTERM, then close the store

use anyhow::{Context, Result};
use clap::Parser;
use myco_common::config::{default_config_path, load_toml_config, ServiceConfig};
use myco_common::db::SeedData;
use myco_common::Store;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use myco_api::cli::Args;
use myco_api::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let toml = load_toml_config(&config_path).context("Failed to load configuration")?;
    let config = ServiceConfig::resolve(args.overrides(), toml);

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("myco_api={0},myco_common={0},tower_http={0}", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Mycolog API (myco-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Database path: {}", config.database_path.display());

    let store = Store::open(&config.database_path)
        .await
        .context("Failed to open store")?;

    if let Some(seed_file) = &config.seed_file {
        let data = SeedData::load(seed_file)
            .with_context(|| format!("Failed to read seed file {}", seed_file.display()))?;
        store.seed(&data).await.context("Failed to seed store")?;
    }

    let app = build_router(AppState::new(store.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .context("Failed to bind to address")?;
    info!("myco-api listening on http://{}", config.bind_address());
    info!("Health check: http://{}/health", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    store.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
