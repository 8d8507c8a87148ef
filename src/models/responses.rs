//! Response DTOs for the auction API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::auction::AuctionRecord;
use crate::tasks::SweepStatsSnapshot;

/// Response body for a single auction
#[derive(Debug, Clone, Serialize)]
pub struct AuctionResponse {
    #[serde(flatten)]
    pub auction: AuctionRecord,
    /// Seconds until the watcher may close the auction, 0 once the deadline passed
    pub remaining_secs: i64,
}

impl AuctionResponse {
    pub fn new(auction: AuctionRecord, now: i64) -> Self {
        let remaining_secs = (auction.ttl - now).max(0);
        Self {
            auction,
            remaining_secs,
        }
    }
}

/// Response body for GET /auctions
#[derive(Debug, Clone, Serialize)]
pub struct AuctionListResponse {
    pub count: usize,
    pub auctions: Vec<AuctionRecord>,
}

impl AuctionListResponse {
    pub fn new(auctions: Vec<AuctionRecord>) -> Self {
        Self {
            count: auctions.len(),
            auctions,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub sweeps: SweepStatsSnapshot,
    /// Configured auction lifetime in seconds
    pub auction_timeout_secs: i64,
    /// Configured sweep interval in milliseconds
    pub poll_interval_ms: u64,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::{AuctionStatus, ProductCondition};

    fn auction() -> AuctionRecord {
        AuctionRecord {
            id: "a1".to_string(),
            product_name: "Chair".to_string(),
            category: "furniture".to_string(),
            description: "Oak dining chair".to_string(),
            condition: ProductCondition::New,
            status: AuctionStatus::Active,
            timestamp: 1000,
            ttl: 2200,
        }
    }

    #[test]
    fn test_auction_response_flattens_record() {
        let resp = AuctionResponse::new(auction(), 2000);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["id"], "a1");
        assert_eq!(json["status"], "active");
        assert_eq!(json["ttl"], 2200);
        assert_eq!(json["remaining_secs"], 200);
    }

    #[test]
    fn test_remaining_never_negative() {
        let resp = AuctionResponse::new(auction(), 9999);
        assert_eq!(resp.remaining_secs, 0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
