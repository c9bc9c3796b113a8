//! PicShare Server: image sharing backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use picshare_core::config::AppConfig;
use picshare_core::error::AppError;
use picshare_core::traits::BlobStore;
use picshare_database::Repositories;
use picshare_storage::LocalBlobStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e.message);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("PICSHARE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting PicShare v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!(
        "Initializing repositories (provider: {:?})...",
        config.database.provider
    );
    let repositories = Repositories::connect(&config.database).await?;
    tracing::info!("Repositories ready");

    // ── Step 2: Blob storage ─────────────────────────────────────
    let blobs = LocalBlobStore::new(&config.storage.upload_dir);
    if !blobs.health_check().await? {
        return Err(AppError::configuration(format!(
            "Upload path is not a directory: {}",
            config.storage.upload_dir
        )));
    }
    tracing::info!(upload_dir = %config.storage.upload_dir, "Blob storage initialized");
    let blobs: Arc<dyn BlobStore> = Arc::new(blobs);

    // ── Step 3: Application state + router ───────────────────────
    let addr = config.server.bind_address();
    let app_state = picshare_api::AppState::new(config, &repositories, blobs);
    let app = picshare_api::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("PicShare server listening on {}", addr);

    // ── Step 4: Serve until shutdown ─────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(pool) = &repositories.pool {
        pool.close().await;
    }

    tracing::info!("PicShare server shut down gracefully");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
