//! Auction Store Module
//!
//! Store adapter seam used by the repository and the expiration watcher,
//! plus an in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::auction::{AuctionRecord, AuctionStatus};
use crate::error::StoreError;

// == Store Adapter ==
/// Persistence operations the service needs from a backing store.
///
/// Implementations do no TTL arithmetic: `ttl` is stamped before `insert`.
/// Timeouts are enforced by callers.
#[async_trait]
pub trait AuctionStore: Send + Sync {
    /// Sets `status = Completed` on every record with `status = Active` and
    /// `ttl <= now`. Returns the number of records changed.
    ///
    /// Each record update is atomic; the batch as a whole need not be.
    async fn complete_expired(&self, now: i64) -> Result<u64, StoreError>;

    /// Persists a new record.
    async fn insert(&self, record: AuctionRecord) -> Result<(), StoreError>;

    /// Looks up a record by id.
    async fn find(&self, id: &str) -> Result<Option<AuctionRecord>, StoreError>;

    /// Returns all records, optionally restricted to one status.
    async fn list(&self, status: Option<AuctionStatus>) -> Result<Vec<AuctionRecord>, StoreError>;
}

// == In-Memory Store ==
/// HashMap-backed store guarded by an async RwLock.
#[derive(Debug, Default)]
pub struct InMemoryAuctionStore {
    auctions: RwLock<HashMap<String, AuctionRecord>>,
}

impl InMemoryAuctionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.auctions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.auctions.read().await.is_empty()
    }
}

#[async_trait]
impl AuctionStore for InMemoryAuctionStore {
    async fn complete_expired(&self, now: i64) -> Result<u64, StoreError> {
        let mut auctions = self.auctions.write().await;
        let completed = auctions
            .values_mut()
            .filter(|record| record.is_expired_at(now))
            .map(|record| record.complete())
            .filter(|changed| *changed)
            .count();
        Ok(completed as u64)
    }

    async fn insert(&self, record: AuctionRecord) -> Result<(), StoreError> {
        let mut auctions = self.auctions.write().await;
        if auctions.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id));
        }
        auctions.insert(record.id.clone(), record);
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<AuctionRecord>, StoreError> {
        Ok(self.auctions.read().await.get(id).cloned())
    }

    async fn list(&self, status: Option<AuctionStatus>) -> Result<Vec<AuctionRecord>, StoreError> {
        let auctions = self.auctions.read().await;
        let mut records: Vec<AuctionRecord> = auctions
            .values()
            .filter(|record| status.map_or(true, |s| record.status == s))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }
}
