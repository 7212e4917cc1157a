use async_trait::async_trait;
use parking_lot::RwLock;

use super::{apply_click, apply_insert, apply_platform_click, apply_remove};
use crate::errors::Result;
use crate::storage::{ClickOutcome, LinkMap, LinkRecord, LinkStore};

/// Process-local store with no durable backing; used for tests and demos.
#[derive(Default)]
pub struct MemoryStore {
    links: RwLock<LinkMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_links(links: LinkMap) -> Self {
        Self {
            links: RwLock::new(links),
        }
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn insert(&self, record: LinkRecord) -> Result<()> {
        apply_insert(&mut self.links.write(), record)
    }

    async fn upsert(&self, record: LinkRecord) -> Result<()> {
        self.links.write().insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<LinkRecord>> {
        Ok(self.links.read().get(id).cloned())
    }

    async fn load_all(&self) -> Result<LinkMap> {
        Ok(self.links.read().clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.links.read().len())
    }

    async fn increment_clicks(&self, id: &str) -> Result<ClickOutcome> {
        Ok(apply_click(&mut self.links.write(), id))
    }

    async fn increment_platform_click(&self, id: &str, platform: &str) -> Result<ClickOutcome> {
        Ok(apply_platform_click(&mut self.links.write(), id, platform))
    }

    async fn remove(&self, id: &str) -> Result<LinkRecord> {
        apply_remove(&mut self.links.write(), id)
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
