//! Sweep Executor
//!
//! One expiration sweep: close every active auction whose deadline has
//! passed. At most one sweep per executor talks to the store at a time.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::auction::{AuctionStore, Clock, SWEEP_STORE_TIMEOUT};
use crate::error::StoreError;
use crate::tasks::SweepStats;

/// Result of a single sweep attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    /// Another sweep held the guard; nothing was done
    Skipped,
    /// Store call succeeded, closing this many auctions
    Completed(u64),
    /// Store call failed or timed out
    Failed(StoreError),
}

// == Sweep Guard ==
/// Single-flight flag owned by one executor.
#[derive(Debug, Default)]
pub struct SweepGuard {
    lock: Mutex<()>,
}

impl SweepGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns immediately. The guard is released when the returned value drops.
    pub fn try_acquire(&self) -> Option<MutexGuard<'_, ()>> {
        self.lock.try_lock().ok()
    }

    pub fn is_held(&self) -> bool {
        self.lock.try_lock().is_err()
    }
}

// == Sweep Executor ==
pub struct SweepExecutor {
    store: Arc<dyn AuctionStore>,
    clock: Arc<dyn Clock>,
    guard: SweepGuard,
    store_timeout: Duration,
    stats: Arc<SweepStats>,
}

impl SweepExecutor {
    /// Creates an executor using the default 300 ms store timeout.
    pub fn new(store: Arc<dyn AuctionStore>, clock: Arc<dyn Clock>, stats: Arc<SweepStats>) -> Self {
        Self {
            store,
            clock,
            guard: SweepGuard::new(),
            store_timeout: SWEEP_STORE_TIMEOUT,
            stats,
        }
    }

    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    pub fn guard(&self) -> &SweepGuard {
        &self.guard
    }

    pub fn stats(&self) -> Arc<SweepStats> {
        self.stats.clone()
    }

    // == Attempt Sweep ==
    /// Runs one sweep unless another is already in flight.
    ///
    /// Store errors and timeouts are logged and counted here and never
    /// returned as `Err`; the next tick retries naturally.
    pub async fn attempt_sweep(&self) -> SweepOutcome {
        self.stats.record_attempt();

        let Some(_held) = self.guard.try_acquire() else {
            debug!("Sweep already in progress, skipping tick");
            self.stats.record_skipped();
            return SweepOutcome::Skipped;
        };

        let now = self.clock.now_secs();
        let result = tokio::time::timeout(self.store_timeout, self.store.complete_expired(now))
            .await
            .unwrap_or_else(|_| Err(StoreError::Timeout(self.store_timeout.as_millis() as u64)));

        match result {
            Ok(closed) => {
                if closed > 0 {
                    info!(closed, now, "Expiration sweep closed auctions");
                } else {
                    debug!(now, "Expiration sweep found no expired auctions");
                }
                self.stats.record_completed(closed);
                SweepOutcome::Completed(closed)
            }
            Err(e) => {
                warn!(error = %e, "error updating timed out auctions");
                self.stats.record_failed();
                SweepOutcome::Failed(e)
            }
        }
    }
}
