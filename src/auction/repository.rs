//! Auction Repository
//!
//! Record creation and lookup on top of a store adapter. New auctions get
//! their TTL deadline stamped here, before they reach the store.

use std::sync::Arc;

use tracing::{debug, error};
use uuid::Uuid;

use crate::auction::{AuctionRecord, AuctionStatus, AuctionStore, Clock, ProductCondition, WatcherConfig};
use crate::error::{AuctionError, Result};

/// Fields supplied by a caller creating an auction.
#[derive(Debug, Clone)]
pub struct NewAuction {
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
}

// == Auction Repository ==
pub struct AuctionRepository {
    store: Arc<dyn AuctionStore>,
    clock: Arc<dyn Clock>,
    config: WatcherConfig,
}

impl AuctionRepository {
    pub fn new(store: Arc<dyn AuctionStore>, clock: Arc<dyn Clock>, config: WatcherConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn store(&self) -> Arc<dyn AuctionStore> {
        self.store.clone()
    }

    pub fn config(&self) -> WatcherConfig {
        self.config
    }

    // == Create ==
    /// Creates an active auction stamped with `ttl = now + lifetime`.
    ///
    /// Insert failures are returned to the caller; they never touch the watcher.
    pub async fn create_auction(&self, new: NewAuction) -> Result<AuctionRecord> {
        let timestamp = self.clock.now_secs();
        let record = AuctionRecord {
            id: Uuid::new_v4().to_string(),
            product_name: new.product_name,
            category: new.category,
            description: new.description,
            condition: new.condition,
            status: AuctionStatus::Active,
            timestamp,
            ttl: self.config.deadline_for(timestamp),
        };

        if let Err(e) = self.store.insert(record.clone()).await {
            error!(id = %record.id, error = %e, "Error trying to insert auction");
            return Err(AuctionError::Store(e));
        }

        debug!(id = %record.id, ttl = record.ttl, "Auction created");
        Ok(record)
    }

    // == Find ==
    pub async fn find_auction(&self, id: &str) -> Result<AuctionRecord> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| AuctionError::NotFound(id.to_string()))
    }

    // == List ==
    pub async fn list_auctions(&self, status: Option<AuctionStatus>) -> Result<Vec<AuctionRecord>> {
        Ok(self.store.list(status).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::{validate_config, InMemoryAuctionStore, ManualClock};
    use crate::error::StoreError;
    use async_trait::async_trait;
    use std::time::Duration;

    fn new_auction() -> NewAuction {
        NewAuction {
            product_name: "Bicycle".to_string(),
            category: "sports".to_string(),
            description: "Road bike, carbon frame".to_string(),
            condition: ProductCondition::Used,
        }
    }

    fn repository(store: Arc<dyn AuctionStore>, now: i64) -> AuctionRepository {
        let config = validate_config(1200, Duration::from_secs(5)).unwrap();
        AuctionRepository::new(store, Arc::new(ManualClock::new(now)), config)
    }

    #[tokio::test]
    async fn test_create_stamps_ttl() {
        let store = Arc::new(InMemoryAuctionStore::new());
        let repo = repository(store.clone(), 1000);

        let created = repo.create_auction(new_auction()).await.unwrap();
        assert_eq!(created.timestamp, 1000);
        assert_eq!(created.ttl, 2200);
        assert_eq!(created.status, AuctionStatus::Active);

        let stored = store.find(&created.id).await.unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() {
        let repo = repository(Arc::new(InMemoryAuctionStore::new()), 1000);
        let result = repo.find_auction("nope").await;
        assert!(matches!(result, Err(AuctionError::NotFound(_))));
    }

    struct BrokenStore;

    #[async_trait]
    impl AuctionStore for BrokenStore {
        async fn complete_expired(&self, _now: i64) -> std::result::Result<u64, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn insert(&self, _record: AuctionRecord) -> std::result::Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn find(&self, _id: &str) -> std::result::Result<Option<AuctionRecord>, StoreError> {
            Ok(None)
        }

        async fn list(
            &self,
            _status: Option<AuctionStatus>,
        ) -> std::result::Result<Vec<AuctionRecord>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_insert_failure_surfaces_to_caller() {
        let repo = repository(Arc::new(BrokenStore), 1000);
        let result = repo.create_auction(new_auction()).await;
        assert!(matches!(
            result,
            Err(AuctionError::Store(StoreError::Unavailable(_)))
        ));
    }
}
