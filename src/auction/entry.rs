//! Auction Record Module
//!
//! Defines the persisted auction record and its status lifecycle.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// == Auction Status ==
/// Lifecycle state of an auction. Only ever moves Active -> Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    Active,
    Completed,
}

impl std::str::FromStr for AuctionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(AuctionStatus::Active),
            "completed" => Ok(AuctionStatus::Completed),
            other => Err(format!("unknown auction status: {}", other)),
        }
    }
}

// == Product Condition ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

// == Auction Record ==
/// An auction as held by the store.
///
/// `timestamp` and `ttl` are Unix epoch seconds. `ttl` is stamped once at
/// creation and is what the watcher filters on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionRecord {
    pub id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
    pub status: AuctionStatus,
    /// Creation time (Unix seconds)
    pub timestamp: i64,
    /// Deadline after which the auction is closed automatically (Unix seconds)
    pub ttl: i64,
}

impl AuctionRecord {
    /// Returns true if the record is still active and its deadline has passed.
    ///
    /// Boundary condition: a record whose ttl equals `now` is expired.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.status == AuctionStatus::Active && self.ttl <= now
    }

    // == Complete ==
    /// Marks the record completed. Returns false if it already was.
    pub fn complete(&mut self) -> bool {
        if self.status == AuctionStatus::Completed {
            return false;
        }
        self.status = AuctionStatus::Completed;
        true
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in seconds.
///
/// Clocks set before the epoch yield negative values rather than panicking.
pub fn current_timestamp_secs() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    }
}
