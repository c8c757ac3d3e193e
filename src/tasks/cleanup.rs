//! Response Cache Sweep
//!
//! Expired entries are otherwise only dropped when read, so keys that are
//! never requested again would stay in memory until evicted for capacity.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::AppState;

/// Spawns a task that removes expired entries from both response caches
/// every `interval`.
///
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_cleanup_task(state: AppState, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache sweep every {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let lists = state.list_cache.write().await.cleanup_expired();
            let duties = state.duty_cache.write().await.cleanup_expired();

            if lists + duties > 0 {
                info!(lists, duties, "Cache sweep removed expired entries");
            } else {
                debug!("Cache sweep: nothing expired");
            }
        }
    })
}
