use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::storage::LinkStore;
use crate::system::PidLock;

/// 关闭超时时间（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Resolve once Ctrl+C arrives (or listening for it fails).
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, closing link store..."),
        Err(e) => warn!(
            "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
            e
        ),
    }
}

/// Close the store and drop the lockfile.
pub async fn perform_shutdown(store: &Arc<dyn LinkStore>, lock: Option<PidLock>) {
    match timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS), store.close()).await {
        Ok(Ok(())) => info!("Link store closed"),
        Ok(Err(e)) => error!("Failed to close link store on shutdown: {}", e),
        Err(_) => error!(
            "Link store close timed out after {} seconds",
            SHUTDOWN_TIMEOUT_SECS
        ),
    }

    if let Some(lock) = lock {
        lock.release();
    }
}
