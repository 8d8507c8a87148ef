//! Integration Tests for the Auction Timeout Watcher
//!
//! Drives a real watcher loop against instrumented stores.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auction_watcher::{
    auction::{
        validate_config, AuctionRecord, AuctionRepository, AuctionStatus, AuctionStore,
        InMemoryAuctionStore, NewAuction, ProductCondition, SystemClock,
    },
    error::StoreError,
    tasks::{SweepExecutor, SweepStats, TimeoutWatcher, WatcherState},
};
use tokio_test::{assert_err, assert_ok};

// == Test Stores ==

/// Counts sweep calls, optionally failing or stalling each one.
#[derive(Default)]
struct CountingStore {
    sweeps: AtomicUsize,
    delay: Duration,
    fail: bool,
}

#[async_trait]
impl AuctionStore for CountingStore {
    async fn complete_expired(&self, _now: i64) -> Result<u64, StoreError> {
        self.sweeps.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(StoreError::Unavailable("no primary".to_string()));
        }
        Ok(0)
    }

    async fn insert(&self, _record: AuctionRecord) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find(&self, _id: &str) -> Result<Option<AuctionRecord>, StoreError> {
        Ok(None)
    }

    async fn list(&self, _status: Option<AuctionStatus>) -> Result<Vec<AuctionRecord>, StoreError> {
        Ok(Vec::new())
    }
}

fn start_watcher(
    store: Arc<dyn AuctionStore>,
    poll_interval: Duration,
    store_timeout: Duration,
) -> (TimeoutWatcher, tokio::task::JoinHandle<()>) {
    let executor = SweepExecutor::new(store, Arc::new(SystemClock), Arc::new(SweepStats::new()))
        .with_store_timeout(store_timeout);
    let watcher = TimeoutWatcher::new(Arc::new(executor), poll_interval);
    let handle = watcher.start().unwrap();
    (watcher, handle)
}

// == Tests ==

#[tokio::test]
async fn test_watcher_fires_automatically() {
    let store = Arc::new(CountingStore::default());
    let (watcher, handle) = start_watcher(
        store.clone(),
        Duration::from_millis(50),
        Duration::from_millis(300),
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    watcher.stop();
    assert_ok!(handle.await);

    assert!(store.sweeps.load(Ordering::SeqCst) >= 2);
    assert_eq!(watcher.state(), WatcherState::Stopped);
}

#[tokio::test]
async fn test_slow_store_causes_skipped_ticks() {
    // Each sweep stalls for 180ms, ticks come every 40ms
    let store = Arc::new(CountingStore {
        delay: Duration::from_millis(180),
        ..CountingStore::default()
    });
    let (watcher, handle) = start_watcher(
        store.clone(),
        Duration::from_millis(40),
        Duration::from_secs(1),
    );

    tokio::time::sleep(Duration::from_millis(300)).await;
    watcher.stop();
    assert_ok!(handle.await);

    let snap = watcher.executor().stats().snapshot();
    assert!(snap.skipped >= 1, "expected skipped ticks, got {:?}", snap);
    assert!(store.sweeps.load(Ordering::SeqCst) < snap.attempts as usize);
}

#[tokio::test]
async fn test_failing_store_keeps_watcher_running() {
    let store = Arc::new(CountingStore {
        fail: true,
        ..CountingStore::default()
    });
    let (watcher, handle) = start_watcher(
        store.clone(),
        Duration::from_millis(30),
        Duration::from_millis(300),
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(watcher.state(), WatcherState::Ticking);
    watcher.stop();
    assert_ok!(handle.await);

    assert!(watcher.executor().stats().snapshot().failed >= 2);
}

#[tokio::test]
async fn test_hung_store_does_not_block_future_ticks() {
    let store = Arc::new(CountingStore {
        delay: Duration::from_secs(30),
        ..CountingStore::default()
    });
    let (watcher, handle) = start_watcher(
        store.clone(),
        Duration::from_millis(50),
        Duration::from_millis(60),
    );

    tokio::time::sleep(Duration::from_millis(400)).await;
    watcher.stop();
    assert_ok!(handle.await);

    // Each timed-out call frees the guard, so later ticks reach the store again
    assert!(store.sweeps.load(Ordering::SeqCst) >= 2);
    assert!(watcher.executor().stats().snapshot().failed >= 2);
}

#[tokio::test]
async fn test_zero_lifetime_auction_closed_by_watcher() {
    let store = Arc::new(InMemoryAuctionStore::new());
    let config = validate_config(0, Duration::from_millis(50)).unwrap();
    let repository = AuctionRepository::new(store.clone(), Arc::new(SystemClock), config);

    let created = repository
        .create_auction(NewAuction {
            product_name: "Watch".to_string(),
            category: "jewelry".to_string(),
            description: "Automatic wrist watch".to_string(),
            condition: ProductCondition::New,
        })
        .await
        .unwrap();
    assert_eq!(created.ttl, created.timestamp);

    let (watcher, handle) = start_watcher(
        store.clone(),
        config.poll_interval(),
        Duration::from_millis(300),
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    watcher.stop();
    assert_ok!(handle.await);

    let closed = repository.find_auction(&created.id).await.unwrap();
    assert_eq!(closed.status, AuctionStatus::Completed);
}

#[tokio::test]
async fn test_zero_poll_interval_prevents_watcher() {
    assert_err!(validate_config(1200, Duration::ZERO));
}
