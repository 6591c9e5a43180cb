//! Configuration for the sliding window log limiter.

use crate::error::InvalidConfigError;
use crate::rate_limiters::MAX_LOG_CAPACITY;
use crate::types::Uint;

/// Immutable admission policy shared by every key.
///
/// The policy reads as "at most `requests_limit` requests per trailing
/// window of `window_ticks` ticks". Ticks are abstract time units supplied
/// by the caller; map your time source (seconds, milliseconds) to ticks.
///
/// # Example
///
/// ```rust
/// use key_guard_core::SlidingWindowLogCoreConfig;
///
/// // 3 requests per 5-tick window
/// let config = SlidingWindowLogCoreConfig::new(3, 5);
/// assert_eq!(config.validate(), Ok(()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingWindowLogCoreConfig {
    /// Maximum number of requests admitted within the window
    pub requests_limit: Uint,
    /// Duration of the sliding window in ticks
    pub window_ticks: Uint,
}

impl SlidingWindowLogCoreConfig {
    /// Creates a new config. Validation is deferred to [`validate`](Self::validate)
    /// or to the consumer constructing a limiter from it.
    pub fn new(requests_limit: Uint, window_ticks: Uint) -> Self {
        SlidingWindowLogCoreConfig {
            requests_limit,
            window_ticks,
        }
    }

    /// Checks the config against the admission rules.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The config is usable
    /// * `Err(InvalidConfigError::ZeroRequestsLimit)` - `requests_limit` is 0
    /// * `Err(InvalidConfigError::ZeroWindowTicks)` - `window_ticks` is 0
    /// * `Err(InvalidConfigError::LimitExceedsLogCapacity)` - `requests_limit`
    ///   exceeds [`MAX_LOG_CAPACITY`]
    ///
    /// Invalid values are rejected outright, never clamped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use key_guard_core::{InvalidConfigError, SlidingWindowLogCoreConfig};
    ///
    /// let config = SlidingWindowLogCoreConfig::new(0, 5);
    /// assert_eq!(config.validate(), Err(InvalidConfigError::ZeroRequestsLimit));
    /// ```
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        if self.requests_limit == 0 {
            return Err(InvalidConfigError::ZeroRequestsLimit);
        }
        if self.window_ticks == 0 {
            return Err(InvalidConfigError::ZeroWindowTicks);
        }
        if self.requests_limit > MAX_LOG_CAPACITY {
            return Err(InvalidConfigError::LimitExceedsLogCapacity {
                requests_limit: self.requests_limit,
                log_capacity: MAX_LOG_CAPACITY,
            });
        }
        Ok(())
    }
}
