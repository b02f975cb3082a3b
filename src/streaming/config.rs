//! Streaming session configuration.
//!
//! [`StreamConfig`] sizes the channels and sets the timeouts;
//! [`ReconnectConfig`] controls how a dropped connection is retried.

use std::time::Duration;

/// How a session retries after the stream connection drops.
///
/// Twitter closes streams during deploys and load shedding, and answers
/// an impatient reconnect with `429 Too Many Requests`. The session
/// therefore waits `initial_backoff` before the first retry and grows the
/// wait by `backoff_multiplier` up to `max_backoff`. A connection that is
/// accepted again resets the count.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use twitter_v2_rs::streaming::ReconnectConfig;
///
/// // 1s, 2s, 4s ... up to 64s, at most 10 tries in a row
/// let config = ReconnectConfig::default();
/// assert_eq!(config.backoff_for_attempt(6), Duration::from_secs(64));
///
/// // Surface the first disconnect as fatal
/// assert!(!ReconnectConfig::disabled().enabled);
///
/// // Keep a long-running collector attached through outages
/// assert_eq!(ReconnectConfig::aggressive().max_attempts, 0);
/// ```
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Reconnect after a transient failure.
    ///
    /// When `false` the first dropped connection, read timeout or 5xx
    /// closes the session with [`Error::ReconnectExhausted`](crate::Error::ReconnectExhausted).
    pub enabled: bool,

    /// Failed connects allowed in a row before giving up; `0` never gives
    /// up.
    pub max_attempts: u32,

    /// Wait before the first retry.
    pub initial_backoff: Duration,

    /// Upper bound on any single wait.
    pub max_backoff: Duration,

    /// Growth factor applied to the wait after each failed retry.
    pub backoff_multiplier: f64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 10,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(64),
            backoff_multiplier: 2.0,
        }
    }
}

impl ReconnectConfig {
    /// Create a configuration with reconnection disabled.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Unlimited attempts with a short, slowly growing backoff.
    pub fn aggressive() -> Self {
        Self {
            enabled: true,
            max_attempts: 0,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            backoff_multiplier: 1.5,
        }
    }

    /// Few attempts with long backoffs, for use during API incidents.
    pub fn conservative() -> Self {
        Self {
            enabled: true,
            max_attempts: 5,
            initial_backoff: Duration::from_secs(5),
            max_backoff: Duration::from_secs(320),
            backoff_multiplier: 2.0,
        }
    }

    /// Set the attempt limit (`0` = unlimited).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the initial and maximum backoff.
    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Wait before retry number `attempt`, counted from 0.
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let base_ms = self.initial_backoff.as_millis() as f64;
        let multiplied = base_ms * self.backoff_multiplier.powi(attempt.min(i32::MAX as u32) as i32);
        let capped = multiplied.min(self.max_backoff.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }

    /// Returns `true` once `attempts` retries have used up the limit.
    pub fn max_attempts_exceeded(&self, attempts: u32) -> bool {
        self.max_attempts > 0 && attempts >= self.max_attempts
    }
}

/// Settings for a streaming session.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use twitter_v2_rs::streaming::{ReconnectConfig, StreamConfig};
///
/// let config = StreamConfig::default()
///     .with_inactivity_timeout(Duration::from_secs(45))
///     .with_reconnect(ReconnectConfig::conservative());
/// assert_eq!(config.data_capacity, 256);
/// ```
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Capacity of the data channel; a full channel pauses reading
    pub data_capacity: usize,
    /// Capacity of the error channel, not counting the slot kept for the
    /// closing error
    pub error_capacity: usize,
    /// Longest accepted line in bytes, terminator included
    ///
    /// Longer lines are dropped and reported as decode errors.
    pub max_line_bytes: usize,
    /// Limit for establishing the connection and receiving headers
    pub connect_timeout: Duration,
    /// Silence after which the connection is treated as dead
    ///
    /// The server sends a heartbeat every 20 seconds.
    pub inactivity_timeout: Duration,
    /// Reconnection behavior
    pub reconnect: ReconnectConfig,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            data_capacity: 256,
            error_capacity: 64,
            max_line_bytes: 1024 * 1024,
            connect_timeout: Duration::from_secs(10),
            inactivity_timeout: Duration::from_secs(30),
            reconnect: ReconnectConfig::default(),
        }
    }
}

impl StreamConfig {
    /// Set both channel capacities.
    pub fn with_capacity(mut self, data: usize, errors: usize) -> Self {
        self.data_capacity = data;
        self.error_capacity = errors;
        self
    }

    /// Set the line length limit.
    pub fn with_max_line_bytes(mut self, max: usize) -> Self {
        self.max_line_bytes = max;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the inactivity timeout.
    pub fn with_inactivity_timeout(mut self, timeout: Duration) -> Self {
        self.inactivity_timeout = timeout;
        self
    }

    /// Set the reconnection behavior.
    pub fn with_reconnect(mut self, reconnect: ReconnectConfig) -> Self {
        self.reconnect = reconnect;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReconnectConfig::default();
        assert!(config.enabled);
        assert_eq!(config.max_attempts, 10);
        assert_eq!(config.initial_backoff, Duration::from_secs(1));
        assert_eq!(config.max_backoff, Duration::from_secs(64));
    }

    #[test]
    fn test_presets() {
        assert!(!ReconnectConfig::disabled().enabled);
        assert_eq!(ReconnectConfig::aggressive().max_attempts, 0);
        assert_eq!(ReconnectConfig::conservative().max_attempts, 5);
    }

    #[test]
    fn test_backoff_capped_at_max() {
        let config = ReconnectConfig::default()
            .with_backoff(Duration::from_secs(1), Duration::from_secs(10));

        assert_eq!(config.backoff_for_attempt(0), Duration::from_secs(1));
        assert_eq!(config.backoff_for_attempt(2), Duration::from_secs(4));
        assert_eq!(config.backoff_for_attempt(3), Duration::from_secs(8));
        assert_eq!(config.backoff_for_attempt(4), Duration::from_secs(10)); // Capped
        assert_eq!(config.backoff_for_attempt(u32::MAX), Duration::from_secs(10));
    }

    #[test]
    fn test_aggressive_backoff() {
        let config = ReconnectConfig::aggressive();
        assert_eq!(config.backoff_for_attempt(0), Duration::from_millis(500));
        assert_eq!(config.backoff_for_attempt(1), Duration::from_millis(750));
        assert_eq!(config.backoff_for_attempt(2), Duration::from_millis(1125));
    }

    #[test]
    fn test_max_attempts_exceeded() {
        let limited = ReconnectConfig::default().with_max_attempts(3);
        assert!(!limited.max_attempts_exceeded(2));
        assert!(limited.max_attempts_exceeded(3));

        let unlimited = ReconnectConfig::default().with_max_attempts(0);
        assert!(!unlimited.max_attempts_exceeded(1000));
    }

    #[test]
    fn test_stream_config_defaults() {
        let config = StreamConfig::default();
        assert_eq!(config.inactivity_timeout, Duration::from_secs(30));
        assert_eq!(config.error_capacity, 64);
        assert_eq!(config.max_line_bytes, 1024 * 1024);
    }
}
