//! Link storage
//!
//! The whole store is one document mapping link ids to [`LinkRecord`]s.
//! Backends implement [`LinkStore`]; every mutating call is a complete
//! read-modify-write cycle that no other mutation may interleave with.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::StorageConfig;
use crate::errors::{Result, SmartlinkError};

pub mod backend;
pub mod models;

pub use backend::{FileStore, MemoryStore};
pub use models::{LinkMap, LinkRecord, Platform};

/// Outcome of a counter update against a possibly unknown id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Recorded,
    UnknownLink,
}

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Insert a new record. Fails when the id is already taken.
    async fn insert(&self, record: LinkRecord) -> Result<()>;

    /// Insert or replace a record, used by overwrite-mode imports.
    async fn upsert(&self, record: LinkRecord) -> Result<()>;

    async fn get(&self, id: &str) -> Result<Option<LinkRecord>>;

    async fn load_all(&self) -> Result<LinkMap>;

    async fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }

    async fn count(&self) -> Result<usize>;

    /// `clicks += 1`; no-op for unknown ids.
    async fn increment_clicks(&self, id: &str) -> Result<ClickOutcome>;

    /// `platformClicks[platform] += 1`; no-op for unknown ids.
    async fn increment_platform_click(&self, id: &str, platform: &str) -> Result<ClickOutcome>;

    async fn remove(&self, id: &str) -> Result<LinkRecord>;

    /// Wait for pending writes. Never rewrites durable data; safe to call more than once.
    async fn close(&self) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    /// Open the backend selected by `storage.backend`.
    pub async fn open(config: &StorageConfig) -> Result<Arc<dyn LinkStore>> {
        let store: Arc<dyn LinkStore> = match config.backend.as_str() {
            "file" => Arc::new(FileStore::open(config).await?),
            "memory" => Arc::new(MemoryStore::new()),
            other => {
                return Err(SmartlinkError::config(format!(
                    "Unknown storage backend '{}'. Valid: file, memory",
                    other
                )));
            }
        };
        info!("Using storage backend: {}", store.backend_name());
        Ok(store)
    }
}
