//! Configuration Module
//!
//! Handles loading and validating server configuration from environment
//! variables. Validation happens once; a bad value stops startup.

use std::env;
use std::time::Duration;

use crate::auction::{validate_config, WatcherConfig};
use crate::error::ConfigError;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Server configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Auction lifetime and sweep cadence
    pub watcher: WatcherConfig,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `AUCTION_TIMEOUT` - Auction lifetime as a duration, e.g. `20m` (default: 1200s)
    /// - `AUCTION_VERIFY` - Sweep interval as a duration, e.g. `5s` (default: 5s)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = WatcherConfig::default();

        let lifetime_secs = match lookup("AUCTION_TIMEOUT") {
            // Truncated toward zero to whole seconds
            Some(raw) => parse_duration("AUCTION_TIMEOUT", &raw)? / NANOS_PER_SECOND,
            None => defaults.lifetime_secs(),
        };

        let poll_interval = match lookup("AUCTION_VERIFY") {
            Some(raw) => {
                let nanos = parse_duration("AUCTION_VERIFY", &raw)?;
                if nanos <= 0 {
                    return Err(ConfigError::NonPositivePollInterval);
                }
                Duration::from_nanos(nanos as u64)
            }
            None => defaults.poll_interval(),
        };

        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => 3000,
        };

        Ok(Self {
            watcher: validate_config(lifetime_secs, poll_interval)?,
            server_port,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watcher: WatcherConfig::default(),
            server_port: 3000,
        }
    }
}

// == Duration Parsing ==
/// Parses a signed duration such as `300ms`, `-1.5h` or `2h45m` into nanoseconds.
///
/// Valid units are `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m` and `h`. Every
/// number needs a unit except the bare string `0`.
pub fn parse_duration(key: &str, input: &str) -> Result<i64, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidDuration {
        key: key.to_string(),
        reason: format!("{} in {:?}", reason, input),
    };

    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let limit = i64::MAX as u128 + u128::from(negative);
    let mut total: u128 = 0;

    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);

        let (frac_digits, after_number) = match after_int.strip_prefix('.') {
            Some(after_dot) => {
                let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
                after_dot.split_at(frac_len)
            }
            None => ("", after_int),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid("expected number"));
        }

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, remainder) = after_number.split_at(unit_len);
        let unit_nanos: u128 = match unit {
            "" => return Err(invalid("missing unit")),
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3_600 * 1_000_000_000,
            _ => return Err(invalid("unknown unit")),
        };

        let mut whole: u128 = 0;
        for digit in int_digits.bytes() {
            whole = whole * 10 + u128::from(digit - b'0');
            if whole > limit {
                return Err(invalid("overflow"));
            }
        }

        // Digits past nanosecond-scale precision cannot change the result.
        let mut fraction: u128 = 0;
        let mut scale: u128 = 1;
        for digit in frac_digits.bytes().take(18) {
            fraction = fraction * 10 + u128::from(digit - b'0');
            scale *= 10;
        }

        total += whole * unit_nanos + fraction * unit_nanos / scale;
        if total > limit {
            return Err(invalid("overflow"));
        }
        rest = remainder;
    }

    if negative {
        Ok((-(total as i128)) as i64)
    } else {
        Ok(total as i64)
    }
}
