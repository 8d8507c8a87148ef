//! Sweep Statistics Module
//!
//! Tracks expiration sweep outcomes. Shared between concurrently running
//! sweep tasks, so counters are atomics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Sweep Stats ==
#[derive(Debug, Default)]
pub struct SweepStats {
    attempts: AtomicU64,
    skipped: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    auctions_closed: AtomicU64,
}

/// Point-in-time copy of [`SweepStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepStatsSnapshot {
    /// Sweep attempts started (one per tick)
    pub attempts: u64,
    /// Attempts that found the guard held
    pub skipped: u64,
    /// Attempts whose store call succeeded
    pub completed: u64,
    /// Attempts whose store call failed or timed out
    pub failed: u64,
    /// Auctions moved to completed across all sweeps
    pub auctions_closed: u64,
}

impl SweepStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_completed(&self, closed: u64) {
        self.completed.fetch_add(1, Ordering::Relaxed);
        self.auctions_closed.fetch_add(closed, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> SweepStatsSnapshot {
        SweepStatsSnapshot {
            attempts: self.attempts.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            auctions_closed: self.auctions_closed.load(Ordering::Relaxed),
        }
    }
}
