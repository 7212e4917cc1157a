use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::retry::{RetryConfig, with_retry};
use super::{apply_click, apply_insert, apply_platform_click, apply_remove, audit_loaded};
use crate::config::StorageConfig;
use crate::errors::{Result, SmartlinkError};
use crate::storage::{ClickOutcome, LinkMap, LinkRecord, LinkStore};

/// JSON document store.
///
/// The document is held in memory behind one async mutex. A mutation takes the
/// lock, applies the change to a copy, writes the whole copy to disk and only
/// then swaps it in, so a failed write leaves the in-memory state untouched and
/// no two read-modify-write cycles can interleave across the `.await` on I/O.
pub struct FileStore {
    path: PathBuf,
    links: Mutex<LinkMap>,
    retry: RetryConfig,
}

impl FileStore {
    /// Load the document, creating an empty `{}` one (and its directory) if absent.
    ///
    /// A document that exists but cannot be parsed is an error: replacing it
    /// with an empty map would wipe every link on the next write.
    pub async fn open(config: &StorageConfig) -> Result<Self> {
        Self::open_path(&config.data_file, RetryConfig::from(config)).await
    }

    pub async fn open_path(path: impl AsRef<Path>, retry: RetryConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                SmartlinkError::file_operation(format!(
                    "Failed to create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let links = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => LinkMap::new(),
            Ok(content) => serde_json::from_str::<LinkMap>(&content).map_err(|e| {
                error!("Failed to parse link file {}: {}", path.display(), e);
                SmartlinkError::serialization(format!(
                    "Failed to parse link file {}: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Link file not found, creating empty document: {}", path.display());
                fs::write(&path, "{}").await.map_err(|e| {
                    SmartlinkError::file_operation(format!(
                        "Failed to create link file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                LinkMap::new()
            }
            Err(e) => {
                return Err(SmartlinkError::file_operation(format!(
                    "Failed to read link file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        audit_loaded(&links);
        info!("Loaded {} smart links from {}", links.len(), path.display());

        Ok(Self {
            path,
            links: Mutex::new(links),
            retry,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "links.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write the full document via a temp file and rename.
    async fn persist(&self, links: &LinkMap) -> Result<()> {
        let json = serde_json::to_string_pretty(links)?;
        let tmp = self.temp_path();
        let (tmp, target, bytes) = (tmp.as_path(), self.path.as_path(), json.as_bytes());

        with_retry("write link file", self.retry, move || async move {
            fs::write(tmp, bytes).await?;
            fs::rename(tmp, target).await
        })
        .await
        .map_err(|e| {
            error!("Failed to write link file {}: {}", self.path.display(), e);
            SmartlinkError::file_operation(format!(
                "Failed to write link file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// One locked read-modify-write cycle.
    ///
    /// `apply` returns the caller's value plus whether the document changed;
    /// unchanged documents are not rewritten.
    async fn mutate<T, F>(&self, apply: F) -> Result<T>
    where
        F: FnOnce(&mut LinkMap) -> Result<(T, bool)> + Send,
        T: Send,
    {
        let mut guard = self.links.lock().await;
        let mut next = guard.clone();
        let (out, changed) = apply(&mut next)?;
        if changed {
            self.persist(&next).await?;
            *guard = next;
        }
        Ok(out)
    }
}

#[async_trait]
impl LinkStore for FileStore {
    async fn insert(&self, record: LinkRecord) -> Result<()> {
        let id = record.id.clone();
        self.mutate(|links| apply_insert(links, record).map(|()| ((), true)))
            .await?;
        debug!("Stored new link {}", id);
        Ok(())
    }

    async fn upsert(&self, record: LinkRecord) -> Result<()> {
        self.mutate(|links| {
            links.insert(record.id.clone(), record);
            Ok(((), true))
        })
        .await
    }

    async fn get(&self, id: &str) -> Result<Option<LinkRecord>> {
        Ok(self.links.lock().await.get(id).cloned())
    }

    async fn load_all(&self) -> Result<LinkMap> {
        Ok(self.links.lock().await.clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.links.lock().await.len())
    }

    async fn increment_clicks(&self, id: &str) -> Result<ClickOutcome> {
        self.mutate(|links| {
            let outcome = apply_click(links, id);
            Ok((outcome, outcome == ClickOutcome::Recorded))
        })
        .await
    }

    async fn increment_platform_click(&self, id: &str, platform: &str) -> Result<ClickOutcome> {
        self.mutate(|links| {
            let outcome = apply_platform_click(links, id, platform);
            Ok((outcome, outcome == ClickOutcome::Recorded))
        })
        .await
    }

    async fn remove(&self, id: &str) -> Result<LinkRecord> {
        self.mutate(|links| apply_remove(links, id).map(|r| (r, true)))
            .await
    }

    /// Waits for in-flight writes. Every committed mutation is already on
    /// disk, so nothing is rewritten: a read-only opener (CLI `list`) must not
    /// overwrite a document another process has since updated.
    async fn close(&self) -> Result<()> {
        let guard = self.links.lock().await;
        info!(
            "Link file closed: {} ({} links)",
            self.path.display(),
            guard.len()
        );
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
