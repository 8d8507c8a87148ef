//! Auction Watcher - auction service that closes auctions on their own
//!
//! Auctions are stamped with a deadline when created; a background watcher
//! sweeps the store and completes every active auction past its deadline.

pub mod api;
pub mod auction;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::{SweepExecutor, SweepOutcome, TimeoutWatcher};
