use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default number of retries after the initial attempt.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default deadline over one whole logical call, in ms.
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default flat delay between attempts, in ms.
const DEFAULT_BACKOFF_DELAY_MS: u64 = 1_000;

/// Retry policy for JSON-RPC calls.
///
/// One logical call performs at most `max_retries + 1` attempts, and
/// `timeout_ms` bounds the whole call including every attempt and backoff
/// wait. The backoff is flat, not exponential: the remote services this
/// coordinator talks to either answer promptly or are down for a multiple of
/// any reasonable backoff window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the initial attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Deadline over the whole call, fixed at call start.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Flat delay between consecutive attempts.
    #[serde(default = "default_backoff_delay_ms")]
    pub backoff_delay_ms: u64,
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_backoff_delay_ms() -> u64 {
    DEFAULT_BACKOFF_DELAY_MS
}

impl RetryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn backoff_delay(&self) -> Duration {
        Duration::from_millis(self.backoff_delay_ms)
    }

    /// Upper bound on attempts for one logical call.
    pub fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            backoff_delay_ms: DEFAULT_BACKOFF_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_attempts() {
        let config = RetryConfig {
            max_retries: 2,
            ..Default::default()
        };
        assert_eq!(config.total_attempts(), 3);

        let config = RetryConfig {
            max_retries: 0,
            ..Default::default()
        };
        assert_eq!(config.total_attempts(), 1);
    }

    #[test]
    fn test_duration_accessors() {
        let config = RetryConfig {
            max_retries: 1,
            timeout_ms: 2_000,
            backoff_delay_ms: 10,
        };
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.backoff_delay(), Duration::from_millis(10));
    }
}
