//! Keyed admission control: routes each request to its own sliding window log.

use dashmap::DashMap;

use crate::config::SlidingWindowLogCoreConfig;
use crate::rate_limiters::SlidingWindowLogCore;
use crate::{
    InvalidConfigError, SimpleAdmitError, SimpleAdmitResult, Uint, VerboseAdmitError,
    VerboseAdmitResult,
};

/// Maximum key length in bytes.
///
/// Longer keys are rejected with [`SimpleAdmitError::KeyTooLong`], never
/// truncated: truncation would collide two distinct keys onto one log.
pub const MAX_KEY_BYTES: usize = 50;

/// Per-key rate limiter backed by one [`SlidingWindowLogCore`] per key.
///
/// Keys are compared byte-exact and case-sensitive. A key's log is created
/// lazily on its first admission check and lives until [`sweep_idle_at`]
/// removes it, [`clear`] is called, or the limiter is dropped.
///
/// The registry is a sharded concurrent map: creation of a key's log is
/// atomic and deduplicated, and admissions for distinct keys do not contend
/// with each other. Admissions for the same key are serialized by that
/// log's own lock.
///
/// [`sweep_idle_at`]: Self::sweep_idle_at
/// [`clear`]: Self::clear
///
/// # Example
///
/// ```rust
/// use key_guard_core::{KeyedRateLimiter, SlidingWindowLogCoreConfig};
///
/// // Allow 3 requests per key per 5-tick window
/// let limiter = KeyedRateLimiter::new(SlidingWindowLogCoreConfig::new(3, 5)).unwrap();
///
/// assert!(limiter.admit("user1", 0));
/// assert!(limiter.admit("user1", 1));
/// assert!(limiter.admit("user1", 2));
/// assert!(!limiter.admit("user1", 3));
/// assert!(!limiter.admit("user1", 4));
///
/// // Tick 6: the request from tick 0 ages out, freeing a slot
/// assert!(limiter.admit("user1", 6));
///
/// // Other keys are tracked independently
/// assert!(limiter.admit("user2", 6));
/// ```
pub struct KeyedRateLimiter {
    /// Process-wide admission policy applied to every key
    config: SlidingWindowLogCoreConfig,
    /// One sliding window log per key, created lazily
    entries: DashMap<String, SlidingWindowLogCore>,
}

impl KeyedRateLimiter {
    /// Creates a keyed limiter from the given policy.
    ///
    /// # Returns
    ///
    /// * `Ok(KeyedRateLimiter)` - The config passed validation
    /// * `Err(InvalidConfigError)` - Zero limit, zero window, or a limit
    ///   beyond the per-key log capacity
    ///
    /// # Example
    ///
    /// ```rust
    /// use key_guard_core::{InvalidConfigError, KeyedRateLimiter, SlidingWindowLogCoreConfig};
    ///
    /// assert!(KeyedRateLimiter::new(SlidingWindowLogCoreConfig::new(100, 60)).is_ok());
    /// assert_eq!(
    ///     KeyedRateLimiter::new(SlidingWindowLogCoreConfig::new(100, 0)).err(),
    ///     Some(InvalidConfigError::ZeroWindowTicks),
    /// );
    /// ```
    pub fn new(config: SlidingWindowLogCoreConfig) -> Result<Self, InvalidConfigError> {
        config.validate()?;
        Ok(KeyedRateLimiter {
            config,
            entries: DashMap::new(),
        })
    }

    /// Checks whether a request for `key` is allowed at the given tick.
    ///
    /// This is the boolean surface of [`try_admit_at`](Self::try_admit_at):
    /// `true` iff the request was admitted. The mapping is fail-closed:
    /// an over-long key, a backwards tick, or lock contention all deny the
    /// request. Callers that need the reason should use `try_admit_at`.
    #[inline]
    pub fn admit(&self, key: &str, tick: Uint) -> bool {
        self.try_admit_at(key, tick).is_ok()
    }

    /// Attempts to admit one request for `key` at the given tick (fast-path).
    ///
    /// The key's log is looked up, created empty if this is the first
    /// request for the key, and the sliding-window-log check runs against
    /// it. Lazy creation is the only mutation point of the key set.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The request was admitted and its tick recorded
    /// * `Err(SimpleAdmitError::LimitExceeded)` - The key's window already
    ///   holds `requests_limit` requests
    /// * `Err(SimpleAdmitError::KeyTooLong)` - The key exceeds
    ///   [`MAX_KEY_BYTES`]
    /// * `Err(SimpleAdmitError::ExpiredTick)` - The tick is older than the
    ///   key's last observed operation
    /// * `Err(SimpleAdmitError::ContentionFailure)` - The key's log is
    ///   locked by another operation
    pub fn try_admit_at(&self, key: &str, tick: Uint) -> SimpleAdmitResult {
        if key.len() > MAX_KEY_BYTES {
            return Err(SimpleAdmitError::KeyTooLong);
        }

        // Common case: the key already has a log. Falls back to the entry
        // API on miss, which deduplicates racing creations.
        if let Some(core) = self.entries.get(key) {
            return core.try_admit_at(tick);
        }
        let core = self
            .entries
            .entry(key.to_owned())
            .or_insert_with(|| self.new_core(key));
        core.try_admit_at(tick)
    }

    /// Attempts to admit one request for `key`, returning detailed
    /// diagnostics on denial.
    ///
    /// Same decision as [`try_admit_at`](Self::try_admit_at) with verbose
    /// error context.
    ///
    /// # Example
    ///
    /// ```rust
    /// use key_guard_core::{KeyedRateLimiter, SlidingWindowLogCoreConfig, VerboseAdmitError};
    ///
    /// let limiter = KeyedRateLimiter::new(SlidingWindowLogCoreConfig::new(1, 10)).unwrap();
    /// assert_eq!(limiter.try_admit_verbose_at("user1", 0), Ok(()));
    ///
    /// assert_eq!(
    ///     limiter.try_admit_verbose_at("user1", 4),
    ///     Err(VerboseAdmitError::LimitExceeded {
    ///         limit: 1,
    ///         in_window: 1,
    ///         retry_after_ticks: 6,
    ///     })
    /// );
    /// ```
    pub fn try_admit_verbose_at(&self, key: &str, tick: Uint) -> VerboseAdmitResult {
        if key.len() > MAX_KEY_BYTES {
            return Err(VerboseAdmitError::KeyTooLong {
                length: key.len(),
                max_length: MAX_KEY_BYTES,
            });
        }

        if let Some(core) = self.entries.get(key) {
            return core.try_admit_verbose_at(tick);
        }
        let core = self
            .entries
            .entry(key.to_owned())
            .or_insert_with(|| self.new_core(key));
        core.try_admit_verbose_at(tick)
    }

    /// Returns the number of requests still admissible for `key` at the
    /// given tick.
    ///
    /// A key that has never been seen reports the full limit; this method
    /// never creates a log.
    pub fn capacity_remaining(&self, key: &str, tick: Uint) -> Result<Uint, SimpleAdmitError> {
        if key.len() > MAX_KEY_BYTES {
            return Err(SimpleAdmitError::KeyTooLong);
        }

        match self.entries.get(key) {
            Some(core) => core.capacity_remaining(tick),
            None => Ok(self.config.requests_limit),
        }
    }

    /// Removes every key whose log holds no live request at the given tick.
    ///
    /// Expired ticks are evicted from each log first, so a key whose last
    /// request is at least one window old is reclaimed. Returns the number
    /// of keys removed. Call this on whatever cadence suits the workload;
    /// without it the key set grows with the number of distinct keys ever
    /// seen.
    ///
    /// # Example
    ///
    /// ```rust
    /// use key_guard_core::{KeyedRateLimiter, SlidingWindowLogCoreConfig};
    ///
    /// let limiter = KeyedRateLimiter::new(SlidingWindowLogCoreConfig::new(3, 5)).unwrap();
    /// limiter.admit("user1", 0);
    ///
    /// // Tick 5: the only request for user1 has expired
    /// assert_eq!(limiter.sweep_idle_at(5), 1);
    /// assert_eq!(limiter.len(), 0);
    /// ```
    pub fn sweep_idle_at(&self, tick: Uint) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, core| !core.is_idle_at(tick));
        let removed = before.saturating_sub(self.entries.len());

        tracing::debug!(
            removed,
            remaining = self.entries.len(),
            "idle key sweep complete"
        );
        removed
    }

    /// Releases every per-key log.
    ///
    /// Dropping the limiter has the same effect; `clear` exists for callers
    /// that keep the limiter alive but want to tear down its state.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no keys are currently tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The process-wide admission policy.
    pub fn config(&self) -> &SlidingWindowLogCoreConfig {
        &self.config
    }

    fn new_core(&self, key: &str) -> SlidingWindowLogCore {
        tracing::trace!(key, "creating sliding window log for new key");
        SlidingWindowLogCore::new(self.config.requests_limit, self.config.window_ticks)
    }
}
