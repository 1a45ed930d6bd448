//! Background worker for remote quote sync.
//!
//! Runs one sync cycle every N seconds until its cancellation token fires.

use crate::sync::SyncContext;
use quote_generator_types::SyncOutcome;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub async fn run_worker(ctx: SyncContext, poll_interval_secs: u64, shutdown: CancellationToken) {
    log::info!(
        "[QUOTE_SYNC] Worker started (poll interval: {}s, server: {})",
        poll_interval_secs,
        ctx.server_url
    );

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(Duration::from_secs(poll_interval_secs)) => {}
        }

        match ctx.run_cycle().await {
            SyncOutcome::Updated { total } => {
                log::info!("[QUOTE_SYNC] Tick complete: store now holds {} quotes", total);
            }
            SyncOutcome::Failed { error } => {
                log::debug!("[QUOTE_SYNC] Tick aborted: {}", error);
            }
            SyncOutcome::Skipped | SyncOutcome::Unchanged => {}
        }
    }

    log::info!("[QUOTE_SYNC] Worker stopped");
}
