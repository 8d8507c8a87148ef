//! Error types for the auction service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Config Error Enum ==
/// Startup configuration errors. Any of these prevents the watcher from starting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Value is not a valid duration string
    #[error("invalid duration for {key}: {reason}")]
    InvalidDuration { key: String, reason: String },

    /// Poll interval must be strictly positive
    #[error("poll interval must be greater than zero")]
    NonPositivePollInterval,

    /// Port is not a valid u16
    #[error("invalid server port: {0}")]
    InvalidPort(String),
}

// == Store Error Enum ==
/// Errors raised by a store adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Store call did not finish within its deadline
    #[error("store call timed out after {0} ms")]
    Timeout(u64),

    /// Store could not serve the request
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A record with the same id already exists
    #[error("duplicate auction id: {0}")]
    Duplicate(String),
}

// == Watcher Error Enum ==
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherError {
    /// `start` was called on a watcher that is not idle
    #[error("watcher cannot start from state {0:?}")]
    NotIdle(crate::tasks::WatcherState),
}

// == Auction Error Enum ==
/// Unified error type for request handling.
#[derive(Error, Debug)]
pub enum AuctionError {
    /// Auction not found
    #[error("Auction not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Underlying store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// == IntoResponse Implementation ==
impl IntoResponse for AuctionError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuctionError::NotFound(_) => StatusCode::NOT_FOUND,
            AuctionError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AuctionError::Store(StoreError::Duplicate(_)) => StatusCode::CONFLICT,
            AuctionError::Store(StoreError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            AuctionError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handling.
pub type Result<T> = std::result::Result<T, AuctionError>;
