//! Timeout Policy
//!
//! Deadline arithmetic and watcher configuration validation.

use std::time::Duration;

use crate::error::ConfigError;

/// Default auction lifetime in seconds (20 minutes)
pub const DEFAULT_LIFETIME_SECS: i64 = 1200;

/// Default interval between sweep attempts
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Upper bound for a single store call made by a sweep
pub const SWEEP_STORE_TIMEOUT: Duration = Duration::from_millis(300);

// == Compute Deadline ==
/// Returns the TTL deadline (Unix seconds) for a record created at `created_at`.
///
/// Zero and negative lifetimes are accepted; the result may already be in the past.
pub fn compute_deadline(created_at: i64, lifetime_secs: i64) -> i64 {
    created_at.saturating_add(lifetime_secs)
}

// == Watcher Config ==
/// Validated watcher settings. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatcherConfig {
    lifetime_secs: i64,
    poll_interval: Duration,
}

impl WatcherConfig {
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Deadline for a record created at `created_at` under this config.
    pub fn deadline_for(&self, created_at: i64) -> i64 {
        compute_deadline(created_at, self.lifetime_secs)
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            lifetime_secs: DEFAULT_LIFETIME_SECS,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

// == Validate Config ==
/// Builds a [`WatcherConfig`], rejecting a zero poll interval.
///
/// The lifetime is not constrained in sign or magnitude.
pub fn validate_config(
    lifetime_secs: i64,
    poll_interval: Duration,
) -> Result<WatcherConfig, ConfigError> {
    if poll_interval.is_zero() {
        return Err(ConfigError::NonPositivePollInterval);
    }
    Ok(WatcherConfig {
        lifetime_secs,
        poll_interval,
    })
}
