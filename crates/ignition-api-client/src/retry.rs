//! Retry policy for gateway requests.
//!
//! Transport errors, 429 and 5xx are retried with bounded exponential backoff
//! and jitter. Every other status is final. The policy is the same for all
//! HTTP methods; the gateway's mutations are idempotent by key.

use rand::Rng;
use reqwest::StatusCode;
use std::time::Duration;

/// Configuration for retry behavior.
///
/// # Example
///
/// ```
/// use ignition_api_client::RetryConfig;
/// use std::time::Duration;
///
/// let config = RetryConfig::default()
///     .with_max_retries(3)
///     .with_min_backoff(Duration::from_millis(10))
///     .with_max_backoff(Duration::from_millis(50));
/// assert_eq!(config.max_retries, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Lower bound of every wait
    pub min_backoff: Duration,
    /// Upper bound of every wait
    pub max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            min_backoff: Duration::from_millis(50),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// A config that never retries.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Set the number of retries.
    #[must_use]
    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Set the minimum wait.
    #[must_use]
    pub fn with_min_backoff(mut self, duration: Duration) -> Self {
        self.min_backoff = duration;
        self
    }

    /// Set the maximum wait.
    #[must_use]
    pub fn with_max_backoff(mut self, duration: Duration) -> Self {
        self.max_backoff = duration;
        self
    }

    /// Whether a response status warrants another attempt.
    #[must_use]
    pub fn is_retriable(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }

    /// Wait before retry number `retry` (1-based).
    ///
    /// `retry_after` is a server hint and replaces the exponential step; the
    /// result always lies within `[min_backoff, max_backoff]`.
    #[must_use]
    pub fn backoff(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        let min = self.min_backoff;
        let max = self.max_backoff.max(min);

        if let Some(hint) = retry_after {
            return hint.clamp(min, max);
        }

        let factor = 1u32.checked_shl(retry.saturating_sub(1)).unwrap_or(u32::MAX);
        let ceiling = min.saturating_mul(factor).min(max);
        jitter(min, ceiling)
    }
}

fn jitter(low: Duration, high: Duration) -> Duration {
    let low_ms = u64::try_from(low.as_millis()).unwrap_or(u64::MAX);
    let high_ms = u64::try_from(high.as_millis()).unwrap_or(u64::MAX);
    if high_ms <= low_ms {
        return low;
    }
    Duration::from_millis(rand::thread_rng().gen_range(low_ms..=high_ms))
}

/// Parse a `Retry-After` header given in seconds.
///
/// The HTTP-date form is not used by the gateway and yields `None`.
#[must_use]
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
