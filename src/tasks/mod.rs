//! Background Tasks Module
//!
//! Contains the expiration watcher that closes auctions past their deadline.
//!
//! # Tasks
//! - Timeout Watcher: fires a sweep attempt every poll interval
//! - Sweep Executor: single-flight bulk close of expired auctions

mod stats;
mod sweep;
mod watcher;

pub use stats::{SweepStats, SweepStatsSnapshot};
pub use sweep::{SweepExecutor, SweepGuard, SweepOutcome};
pub use watcher::{TimeoutWatcher, WatcherState};
