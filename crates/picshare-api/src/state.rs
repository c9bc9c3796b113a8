//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use picshare_auth::jwt::{JwtDecoder, JwtEncoder};
use picshare_core::config::AppConfig;
use picshare_core::traits::BlobStore;
use picshare_database::DatabasePool;
use picshare_database::repositories::Repositories;
use picshare_service::{AccountService, ImageService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// MySQL connection pool, absent for the in-memory provider
    pub db_pool: Option<DatabasePool>,
    /// Upload storage
    pub blobs: Arc<dyn BlobStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and login
    pub account_service: Arc<AccountService>,
    /// Image catalog and file serving
    pub image_service: Arc<ImageService>,
}

impl AppState {
    /// Wires services from configuration, repositories, and a blob store.
    pub fn new(config: AppConfig, repositories: &Repositories, blobs: Arc<dyn BlobStore>) -> Self {
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let account_service = Arc::new(AccountService::new(
            repositories.accounts.clone(),
            encoder,
        ));
        let image_service = Arc::new(ImageService::new(
            repositories.images.clone(),
            Arc::clone(&blobs),
        ));

        Self {
            config: Arc::new(config),
            db_pool: repositories.pool.clone(),
            blobs,
            jwt_decoder,
            account_service,
            image_service,
        }
    }
}
