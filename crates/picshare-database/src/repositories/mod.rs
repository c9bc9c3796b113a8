//! Account and image repositories.
//!
//! Each table is reached through an async trait so the HTTP layer can run
//! against MySQL in production and against process-local tables in tests.

pub mod account;
pub mod image;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use picshare_core::config::{DatabaseConfig, DatabaseProvider};
use picshare_core::result::AppResult;
use picshare_entity::account::{Account, CreateAccount};
use picshare_entity::image::{CreateImage, Image};

use crate::connection::DatabasePool;
use crate::migration::run_migrations;

pub use account::MySqlAccountRepository;
pub use image::MySqlImageRepository;
pub use memory::{MemoryAccountRepository, MemoryImageRepository};

/// Credential store.
#[async_trait]
pub trait AccountRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new account with the given fields verbatim.
    async fn create(&self, data: &CreateAccount) -> AppResult<Account>;

    /// Find the first account (lowest id) with the given username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;
}

/// Image catalog.
#[async_trait]
pub trait ImageRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new image record with zero likes.
    async fn create(&self, data: &CreateImage) -> AppResult<Image>;

    /// Return every image record in id order.
    async fn find_all(&self) -> AppResult<Vec<Image>>;

    /// Find an image record by primary key.
    async fn find_by_id(&self, id: u64) -> AppResult<Option<Image>>;

    /// Write every column of `image` back to its row.
    async fn save(&self, image: &Image) -> AppResult<Image>;
}

/// The repositories selected by configuration.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Credential store.
    pub accounts: Arc<dyn AccountRepository>,
    /// Image catalog.
    pub images: Arc<dyn ImageRepository>,
    /// Pool backing the MySQL repositories, if any.
    pub pool: Option<DatabasePool>,
}

impl Repositories {
    /// Build repositories for the configured provider.
    ///
    /// For MySQL this connects (creating the database if allowed) and runs
    /// migrations before returning.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Mysql => {
                let pool = DatabasePool::connect(config).await?;
                run_migrations(pool.pool()).await?;
                Ok(Self {
                    accounts: Arc::new(MySqlAccountRepository::new(pool.pool().clone())),
                    images: Arc::new(MySqlImageRepository::new(pool.pool().clone())),
                    pool: Some(pool),
                })
            }
            DatabaseProvider::Memory => {
                info!("Using in-memory repositories; data will not survive a restart");
                Ok(Self::in_memory())
            }
        }
    }

    /// Fresh, empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(MemoryAccountRepository::new()),
            images: Arc::new(MemoryImageRepository::new()),
            pool: None,
        }
    }
}
