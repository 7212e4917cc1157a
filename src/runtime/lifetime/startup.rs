use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::errors;
use crate::services::LinkService;
use crate::storage::{LinkStore, StorageFactory};
use crate::system::PidLock;

pub struct StartupContext {
    pub store: Arc<dyn LinkStore>,
    pub link_service: Arc<LinkService>,
    /// Held by the server for the file backend; `None` for the memory backend.
    pub lock: Option<PidLock>,
}

/// Open the configured store and wrap it in a [`LinkService`].
///
/// Also used by CLI commands, which open the document themselves.
pub async fn open_link_service(config: &StaticConfig) -> errors::Result<Arc<LinkService>> {
    let store = StorageFactory::open(&config.storage).await?;
    Ok(Arc::new(LinkService::new(store, config.links.clone())))
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let lock = if config.storage.backend == "file" {
        Some(PidLock::acquire(&config.storage.data_file).context("Failed to initialize lockfile")?)
    } else {
        None
    };

    let link_service = match open_link_service(config).await {
        Ok(service) => service,
        Err(e) => {
            if let Some(lock) = lock {
                lock.release();
            }
            return Err(e).context("Failed to open link store");
        }
    };
    let store = link_service.store().clone();

    match store.count().await {
        Ok(count) => info!(
            "Using storage backend: {} ({} links)",
            store.backend_name(),
            count
        ),
        Err(e) => warn!(
            "Using storage backend: {} (count unavailable: {})",
            store.backend_name(),
            e
        ),
    }
    debug!("Pre-startup finished in {:?}", start_time.elapsed());

    Ok(StartupContext {
        store,
        link_service,
        lock,
    })
}
