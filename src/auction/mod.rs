//! Auction Module
//!
//! Auction records, TTL policy and the store adapter they live behind.

mod clock;
mod entry;
mod policy;
mod repository;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{current_timestamp_secs, AuctionRecord, AuctionStatus, ProductCondition};
pub use policy::{
    compute_deadline, validate_config, WatcherConfig, DEFAULT_LIFETIME_SECS,
    DEFAULT_POLL_INTERVAL, SWEEP_STORE_TIMEOUT,
};
pub use repository::{AuctionRepository, NewAuction};
pub use store::{AuctionStore, InMemoryAuctionStore};
