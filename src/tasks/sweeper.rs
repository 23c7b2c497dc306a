//! Expired-Entry Sweeper Task
//!
//! Optional background task that periodically drops expired entries across
//! all namespaces. Expiry is lazy by contract; this task only reclaims
//! memory earlier and counts removals exactly like the lazy path, so running
//! it (or not) never changes observable cache behavior.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::manager::CacheManager;

/// Spawns a background task sweeping expired entries at a fixed interval.
///
/// Returns a JoinHandle that the host aborts during graceful shutdown.
pub fn spawn_sweeper_task(manager: Arc<CacheManager>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "starting expired-entry sweeper");

        loop {
            tokio::time::sleep(interval).await;

            let removed = manager.sweep_all().await;
            if removed > 0 {
                info!(removed, "sweeper dropped expired entries");
            } else {
                debug!("sweeper found no expired entries");
            }
        }
    })
}
