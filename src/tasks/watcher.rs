//! Timeout Watcher
//!
//! Background loop that fires a sweep attempt every poll interval.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::WatcherError;
use crate::tasks::SweepExecutor;

/// Lifecycle of a [`TimeoutWatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    Idle,
    Ticking,
    Stopped,
}

impl WatcherState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => WatcherState::Idle,
            1 => WatcherState::Ticking,
            _ => WatcherState::Stopped,
        }
    }
}

// == Timeout Watcher ==
/// Owns the sweep executor and drives it from a timer.
///
/// Each tick spawns its own sweep task; the timer never waits on a sweep.
/// Ticks that land while a sweep is still running are dropped by the
/// executor's guard.
pub struct TimeoutWatcher {
    executor: Arc<SweepExecutor>,
    poll_interval: Duration,
    cancel: CancellationToken,
    state: Arc<AtomicU8>,
}

impl TimeoutWatcher {
    pub fn new(executor: Arc<SweepExecutor>, poll_interval: Duration) -> Self {
        Self {
            executor,
            poll_interval,
            cancel: CancellationToken::new(),
            state: Arc::new(AtomicU8::new(WatcherState::Idle as u8)),
        }
    }

    pub fn state(&self) -> WatcherState {
        WatcherState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn executor(&self) -> Arc<SweepExecutor> {
        self.executor.clone()
    }

    /// Token that stops the loop when cancelled. Clones share the same token.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    // == Start ==
    /// Spawns the tick loop. The first tick fires one interval after start.
    ///
    /// # Returns
    /// A JoinHandle that completes once the loop has observed cancellation.
    pub fn start(&self) -> Result<JoinHandle<()>, WatcherError> {
        if let Err(current) = self.state.compare_exchange(
            WatcherState::Idle as u8,
            WatcherState::Ticking as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            return Err(WatcherError::NotIdle(WatcherState::from_u8(current)));
        }

        let executor = self.executor.clone();
        let cancel = self.cancel.clone();
        let state = self.state.clone();
        let poll_interval = self.poll_interval;

        Ok(tokio::spawn(async move {
            info!(?poll_interval, "Starting auction timeout watcher");

            let mut ticker = tokio::time::interval_at(Instant::now() + poll_interval, poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let executor = executor.clone();
                        tokio::spawn(async move {
                            executor.attempt_sweep().await;
                        });
                    }
                }
            }

            state.store(WatcherState::Stopped as u8, Ordering::SeqCst);
            info!("Auction timeout watcher stopped");
        }))
    }

    // == Stop ==
    /// Cancels the loop. A watcher that never started goes straight to Stopped.
    /// Sweeps already in flight run to completion (bounded by their store timeout).
    pub fn stop(&self) {
        let _ = self.state.compare_exchange(
            WatcherState::Idle as u8,
            WatcherState::Stopped as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::{InMemoryAuctionStore, SystemClock};
    use crate::tasks::SweepStats;

    fn watcher(poll_interval: Duration) -> TimeoutWatcher {
        let executor = SweepExecutor::new(
            Arc::new(InMemoryAuctionStore::new()),
            Arc::new(SystemClock),
            Arc::new(SweepStats::new()),
        );
        TimeoutWatcher::new(Arc::new(executor), poll_interval)
    }

    #[tokio::test]
    async fn test_watcher_starts_idle() {
        let w = watcher(Duration::from_millis(50));
        assert_eq!(w.state(), WatcherState::Idle);
    }

    #[tokio::test]
    async fn test_watcher_ticks_until_stopped() {
        let w = watcher(Duration::from_millis(50));
        let handle = w.start().unwrap();
        assert_eq!(w.state(), WatcherState::Ticking);

        tokio::time::sleep(Duration::from_millis(200)).await;
        w.stop();
        handle.await.unwrap();

        assert_eq!(w.state(), WatcherState::Stopped);
        assert!(w.executor().stats().snapshot().attempts >= 2);
    }

    #[tokio::test]
    async fn test_watcher_cannot_start_twice() {
        let w = watcher(Duration::from_millis(50));
        let handle = w.start().unwrap();

        assert_eq!(
            w.start().unwrap_err(),
            WatcherError::NotIdle(WatcherState::Ticking)
        );

        w.stop();
        handle.await.unwrap();
        assert_eq!(
            w.start().unwrap_err(),
            WatcherError::NotIdle(WatcherState::Stopped)
        );
    }

    #[tokio::test]
    async fn test_stop_before_start() {
        let w = watcher(Duration::from_millis(50));
        w.stop();
        assert_eq!(w.state(), WatcherState::Stopped);
        assert!(w.start().is_err());
    }

    #[tokio::test]
    async fn test_no_ticks_after_cancellation() {
        let w = watcher(Duration::from_millis(20));
        let handle = w.start().unwrap();

        w.cancellation_token().cancel();
        handle.await.unwrap();
        let attempts = w.executor().stats().snapshot().attempts;

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(w.executor().stats().snapshot().attempts, attempts);
    }
}
