//! TTL Cleanup Task
//!
//! Background task that periodically purges expired engine entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::engine::MemoryEngine;

/// Spawns a background task that periodically purges expired entries.
///
/// Reads already treat expired entries as absent; this task only reclaims
/// their memory.
///
/// # Arguments
/// * `engine` - Shared memory engine
/// * `cleanup_interval_secs` - Interval in seconds between cleanup runs
///
/// # Returns
/// A JoinHandle for the spawned task, to be aborted on shutdown.
pub fn spawn_cleanup_task(
    engine: Arc<MemoryEngine>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = engine.purge_expired();

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
