//! In-memory repositories.
//!
//! Used by the `memory` database provider and by tests. Rows live in
//! ordered maps keyed by an auto-incrementing id starting at 1. Reads hand
//! out clones, so a read followed by `save` races exactly like the MySQL
//! implementation does.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use picshare_core::result::AppResult;
use picshare_entity::account::{Account, CreateAccount};
use picshare_entity::image::{CreateImage, Image};

use super::{AccountRepository, ImageRepository};

/// Process-local table with auto-increment keys.
#[derive(Debug)]
struct Table<T> {
    rows: RwLock<BTreeMap<u64, T>>,
    next_id: AtomicU64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    async fn insert_with(&self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = build(id);
        self.rows.write().await.insert(id, row.clone());
        row
    }
}

/// In-memory credential store.
#[derive(Debug, Clone)]
pub struct MemoryAccountRepository {
    table: Arc<Table<Account>>,
}

impl MemoryAccountRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            table: Arc::new(Table::new()),
        }
    }
}

impl Default for MemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        let account = self
            .table
            .insert_with(|id| Account {
                id,
                username: data.username.clone(),
                password: data.password.clone(),
            })
            .await;
        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let rows = self.table.rows.read().await;
        Ok(rows.values().find(|a| a.username == username).cloned())
    }
}

/// In-memory image catalog.
#[derive(Debug, Clone)]
pub struct MemoryImageRepository {
    table: Arc<Table<Image>>,
}

impl MemoryImageRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            table: Arc::new(Table::new()),
        }
    }
}

impl Default for MemoryImageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageRepository for MemoryImageRepository {
    async fn create(&self, data: &CreateImage) -> AppResult<Image> {
        let image = self
            .table
            .insert_with(|id| Image {
                id,
                filename: data.filename.clone(),
                likes: 0,
            })
            .await;
        Ok(image)
    }

    async fn find_all(&self) -> AppResult<Vec<Image>> {
        Ok(self.table.rows.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: u64) -> AppResult<Option<Image>> {
        Ok(self.table.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, image: &Image) -> AppResult<Image> {
        self.table
            .rows
            .write()
            .await
            .insert(image.id, image.clone());
        Ok(image.clone())
    }
}
