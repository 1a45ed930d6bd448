//! Remote sync: merge rule, single-flight gate and one fetch-merge-persist cycle.

use crate::app::QuoteApp;
use crate::notify::Notifier;
use crate::sync_api;
use quote_generator_types::{Quote, SyncOutcome, SyncState};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

pub const SYNC_NOTIFICATION: &str = "Quotes updated from server.";

/// Remote quotes first, in received order, then every local quote whose
/// text does not appear among the remote ones.
pub fn merge_quotes(local: &[Quote], remote: Vec<Quote>) -> Vec<Quote> {
    let mut merged = remote;
    let remote_len = merged.len();
    for quote in local {
        if !merged[..remote_len].iter().any(|r| r.text == quote.text) {
            merged.push(quote.clone());
        }
    }
    merged
}

/// Idle/Syncing flag. A cycle that cannot enter is dropped, never queued.
#[derive(Default)]
pub struct SyncGate {
    syncing: AtomicBool,
}

impl SyncGate {
    pub fn try_begin(&self) -> Option<SyncPermit<'_>> {
        self.syncing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SyncPermit { gate: self })
    }

    pub fn state(&self) -> SyncState {
        if self.syncing.load(Ordering::Acquire) {
            SyncState::Syncing
        } else {
            SyncState::Idle
        }
    }
}

/// Returns the gate to Idle when dropped, including on early return.
pub struct SyncPermit<'a> {
    gate: &'a SyncGate,
}

impl Drop for SyncPermit<'_> {
    fn drop(&mut self) {
        self.gate.syncing.store(false, Ordering::Release);
    }
}

/// Everything a sync cycle touches.
#[derive(Clone)]
pub struct SyncContext {
    pub app: Arc<Mutex<QuoteApp>>,
    pub client: reqwest::Client,
    pub server_url: String,
    pub gate: Arc<SyncGate>,
    pub notifier: Arc<Notifier>,
    pub last_sync_at: Arc<Mutex<Option<String>>>,
}

impl SyncContext {
    /// One sync cycle. Fetch failures are logged and leave the store untouched.
    pub async fn run_cycle(&self) -> SyncOutcome {
        let Some(_permit) = self.gate.try_begin() else {
            log::debug!("[QUOTE_SYNC] Cycle already running, skipping");
            return SyncOutcome::Skipped;
        };

        let remote = match sync_api::fetch_server_quotes(&self.client, &self.server_url).await {
            Ok(quotes) => quotes,
            Err(e) => {
                log::warn!("[QUOTE_SYNC] Sync failed: {}", e);
                return SyncOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let outcome = self.apply(remote).await;
        *self.last_sync_at.lock().await = Some(chrono::Utc::now().to_rfc3339());
        outcome
    }

    /// Merge step of a cycle, separated from the fetch.
    pub async fn apply(&self, remote: Vec<Quote>) -> SyncOutcome {
        let fetched = remote.len();
        let mut app = self.app.lock().await;
        if app.apply_remote(remote) {
            let total = app.store().len();
            drop(app);
            log::info!(
                "[QUOTE_SYNC] Store updated from server ({} fetched, {} total)",
                fetched,
                total
            );
            self.notifier.notify(SYNC_NOTIFICATION);
            SyncOutcome::Updated { total }
        } else {
            log::debug!("[QUOTE_SYNC] No changes from server");
            SyncOutcome::Unchanged
        }
    }
}
