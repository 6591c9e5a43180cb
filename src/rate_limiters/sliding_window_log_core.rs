use std::sync::Mutex;

use crate::config::SlidingWindowLogCoreConfig;
use crate::rate_limiter_core::RateLimiterCore;
use crate::rate_limiters::TimestampLog;
use crate::{
    InvalidConfigError, SimpleAdmitError, SimpleAdmitResult, Uint, VerboseAdmitError,
    VerboseAdmitResult,
};

/// Maximum number of ticks a single key's log can hold.
///
/// `requests_limit` may never exceed this value; the bound is enforced at
/// configuration time so the log can be allocated once, exactly sized, and
/// never reallocated on the hot path.
pub const MAX_LOG_CAPACITY: Uint = 1000;

/// Core implementation of the sliding window log rate limiting algorithm.
///
/// The sliding window log algorithm keeps the exact tick of every admitted
/// request and counts how many fall within the trailing window. This makes
/// it exact: unlike fixed or bucketed counters there are no boundary
/// artifacts where a burst straddling two windows is double-admitted.
///
/// # Algorithm Behavior
///
/// - Each admitted request's tick is recorded in a fixed-capacity log
/// - On every check, ticks that have aged out of the trailing window are
///   evicted from the head of the log before the limit is applied
/// - The window is half-open `(tick - window_ticks, tick]`: an entry
///   exactly `window_ticks` old is expired
/// - A denied request is not recorded and does not count against the window
/// - Eviction work is amortized O(1): every recorded tick is evicted
///   exactly once
///
/// # Example
///
/// ```rust
/// use key_guard_core::rate_limiters::SlidingWindowLogCore;
///
/// // Allow 3 requests per 5-tick window
/// let core = SlidingWindowLogCore::new(3, 5);
///
/// assert_eq!(core.try_admit_at(0), Ok(()));
/// assert_eq!(core.try_admit_at(1), Ok(()));
/// assert_eq!(core.try_admit_at(2), Ok(()));
///
/// // Window is full
/// assert!(core.try_admit_at(3).is_err());
///
/// // Tick 6: the request from tick 0 ages out (6 - 0 >= 5), freeing a slot
/// assert_eq!(core.try_admit_at(6), Ok(()));
/// ```
pub struct SlidingWindowLogCore {
    /// Maximum number of requests admitted within the window
    requests_limit: Uint,
    /// Duration of the sliding window in ticks
    window_ticks: Uint,
    /// Internal state protected by mutex for thread safety
    state: Mutex<SlidingWindowLogCoreState>,
}

/// Internal state of the sliding window log
struct SlidingWindowLogCoreState {
    /// Ticks of requests admitted within the current window, oldest first
    log: TimestampLog,
    /// Latest tick observed by any operation (used to reject backwards time)
    last_tick: Uint,
}

impl SlidingWindowLogCore {
    /// Creates a new sliding window log with the specified parameters.
    ///
    /// # Parameters
    ///
    /// * `requests_limit` - Maximum number of requests admitted within the window
    /// * `window_ticks` - Duration of the sliding window in ticks
    ///
    /// A `requests_limit` of 0 is accepted and denies every request; a
    /// `window_ticks` of 0 makes every recorded request expire by the next
    /// check. Use [`with_config`](Self::with_config) to reject both as
    /// configuration errors instead.
    ///
    /// # Panics
    ///
    /// Panics if `requests_limit` exceeds [`MAX_LOG_CAPACITY`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use key_guard_core::rate_limiters::SlidingWindowLogCore;
    ///
    /// // Allow 100 requests per 60-tick window
    /// let core = SlidingWindowLogCore::new(100, 60);
    /// ```
    pub fn new(requests_limit: Uint, window_ticks: Uint) -> Self {
        assert!(
            requests_limit <= MAX_LOG_CAPACITY,
            "requests_limit must not exceed MAX_LOG_CAPACITY"
        );

        SlidingWindowLogCore {
            requests_limit,
            window_ticks,
            state: Mutex::new(SlidingWindowLogCoreState {
                log: TimestampLog::new(requests_limit as usize),
                last_tick: 0,
            }),
        }
    }

    /// Creates a sliding window log from a validated config.
    ///
    /// # Returns
    ///
    /// * `Ok(SlidingWindowLogCore)` - The config passed validation
    /// * `Err(InvalidConfigError)` - Zero limit, zero window, or a limit
    ///   beyond [`MAX_LOG_CAPACITY`]
    ///
    /// # Example
    ///
    /// ```rust
    /// use key_guard_core::rate_limiters::SlidingWindowLogCore;
    /// use key_guard_core::SlidingWindowLogCoreConfig;
    ///
    /// let core = SlidingWindowLogCore::with_config(&SlidingWindowLogCoreConfig::new(3, 5));
    /// assert!(core.is_ok());
    /// ```
    pub fn with_config(config: &SlidingWindowLogCoreConfig) -> Result<Self, InvalidConfigError> {
        config.validate()?;
        Ok(Self::new(config.requests_limit, config.window_ticks))
    }

    /// Attempts to admit one request at the given tick.
    ///
    /// Expired ticks are evicted from the head of the log, then the limit
    /// is checked. A denied request is not recorded: only admitted requests
    /// count against the window.
    ///
    /// # Parameters
    ///
    /// * `tick` - Current time tick for the operation
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The request was admitted and its tick recorded
    /// * `Err(SimpleAdmitError::LimitExceeded)` - The window already holds
    ///   `requests_limit` requests
    /// * `Err(SimpleAdmitError::ContentionFailure)` - Unable to acquire the
    ///   internal lock
    /// * `Err(SimpleAdmitError::ExpiredTick)` - The tick is older than the
    ///   last observed operation
    ///
    /// # Example
    ///
    /// ```rust
    /// use key_guard_core::rate_limiters::SlidingWindowLogCore;
    /// use key_guard_core::SimpleAdmitError;
    ///
    /// let core = SlidingWindowLogCore::new(1, 10);
    ///
    /// assert_eq!(core.try_admit_at(0), Ok(()));
    /// assert_eq!(core.try_admit_at(5), Err(SimpleAdmitError::LimitExceeded));
    ///
    /// // Tick 10: the entry from tick 0 is exactly one window old and expires
    /// assert_eq!(core.try_admit_at(10), Ok(()));
    /// ```
    #[inline]
    pub fn try_admit_at(&self, tick: Uint) -> SimpleAdmitResult {
        self.try_admit_verbose_at(tick).map_err(SimpleAdmitError::from)
    }

    /// Attempts to admit one request at the given tick, returning detailed
    /// diagnostics on denial.
    ///
    /// # Parameters
    ///
    /// * `tick` - Current time tick for the operation
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The request was admitted and its tick recorded
    /// * `Err(VerboseAdmitError::LimitExceeded)` - Includes the limit, the
    ///   current window occupancy, and `retry_after_ticks`
    /// * `Err(VerboseAdmitError::ContentionFailure)` - Unable to acquire the
    ///   internal lock
    /// * `Err(VerboseAdmitError::ExpiredTick)` - Includes the minimum
    ///   acceptable tick
    ///
    /// # Example
    ///
    /// ```rust
    /// use key_guard_core::rate_limiters::SlidingWindowLogCore;
    /// use key_guard_core::VerboseAdmitError;
    ///
    /// let core = SlidingWindowLogCore::new(2, 10);
    /// assert_eq!(core.try_admit_at(0), Ok(()));
    /// assert_eq!(core.try_admit_at(1), Ok(()));
    ///
    /// // The slot from tick 0 frees at tick 10, i.e. 5 ticks from now
    /// assert_eq!(
    ///     core.try_admit_verbose_at(5),
    ///     Err(VerboseAdmitError::LimitExceeded {
    ///         limit: 2,
    ///         in_window: 2,
    ///         retry_after_ticks: 5,
    ///     })
    /// );
    /// ```
    pub fn try_admit_verbose_at(&self, tick: Uint) -> VerboseAdmitResult {
        // Attempt to acquire the lock, return contention error if unavailable
        let mut state = match self.state.try_lock() {
            Ok(guard) => guard,
            Err(_) => return Err(VerboseAdmitError::ContentionFailure),
        };

        // Prevent time from going backwards
        if tick < state.last_tick {
            return Err(VerboseAdmitError::ExpiredTick {
                min_acceptable_tick: state.last_tick,
            });
        }
        state.last_tick = tick;

        Self::evict_expired(&mut state.log, tick, self.window_ticks);

        if state.log.len() as Uint >= self.requests_limit {
            // The oldest entry expires at head + window_ticks; until then
            // every slot stays occupied.
            let retry_after_ticks = match state.log.front() {
                Some(head) => head.saturating_add(self.window_ticks).saturating_sub(tick),
                None => Uint::MAX, // requests_limit == 0, nothing ever frees
            };
            return Err(VerboseAdmitError::LimitExceeded {
                limit: self.requests_limit,
                in_window: state.log.len() as Uint,
                retry_after_ticks,
            });
        }

        state.log.push_back(tick);
        Ok(())
    }

    /// Returns the number of requests still admissible at the given tick.
    ///
    /// Eviction runs first, so the answer reflects the trailing window at
    /// the moment of the call.
    ///
    /// # Returns
    ///
    /// * `Ok(remaining)` - Requests admissible before the limit is reached
    /// * `Err(SimpleAdmitError::ContentionFailure)` - Unable to acquire the
    ///   internal lock
    /// * `Err(SimpleAdmitError::ExpiredTick)` - The tick is older than the
    ///   last observed operation
    pub fn capacity_remaining(&self, tick: Uint) -> Result<Uint, SimpleAdmitError> {
        let mut state = match self.state.try_lock() {
            Ok(guard) => guard,
            Err(_) => return Err(SimpleAdmitError::ContentionFailure),
        };

        if tick < state.last_tick {
            return Err(SimpleAdmitError::ExpiredTick);
        }
        state.last_tick = tick;

        Self::evict_expired(&mut state.log, tick, self.window_ticks);

        Ok(self.requests_limit.saturating_sub(state.log.len() as Uint))
    }

    /// Evicts expired ticks and reports whether the log is empty afterwards.
    ///
    /// Used by the keyed registry's idle sweep. Contended cores are
    /// reported as busy rather than idle.
    pub(crate) fn is_idle_at(&self, tick: Uint) -> bool {
        let mut state = match self.state.try_lock() {
            Ok(guard) => guard,
            Err(_) => return false,
        };

        if tick > state.last_tick {
            state.last_tick = tick;
        }
        Self::evict_expired(&mut state.log, tick, self.window_ticks);

        state.log.is_empty()
    }

    /// Removes every tick that has aged out of the trailing window.
    ///
    /// The window is half-open `(tick - window_ticks, tick]`, so an entry
    /// exactly `window_ticks` old is removed.
    #[inline]
    fn evict_expired(log: &mut TimestampLog, tick: Uint, window_ticks: Uint) {
        while let Some(head) = log.front() {
            if tick.saturating_sub(head) >= window_ticks {
                log.pop_front();
            } else {
                break;
            }
        }
    }
}

impl RateLimiterCore for SlidingWindowLogCore {
    /// Attempts to admit one request at the given tick.
    ///
    /// This method is a wrapper that calls the main `try_admit_at` logic.
    #[inline(always)]
    fn try_admit_at(&self, tick: Uint) -> SimpleAdmitResult {
        self.try_admit_at(tick)
    }

    /// Attempts to admit one request, returning detailed diagnostics.
    ///
    /// This method is a wrapper that calls the main `try_admit_verbose_at` logic.
    #[inline(always)]
    fn try_admit_verbose_at(&self, tick: Uint) -> VerboseAdmitResult {
        self.try_admit_verbose_at(tick)
    }

    /// Returns the number of requests still admissible at the given tick.
    #[inline(always)]
    fn capacity_remaining(&self, tick: Uint) -> Result<Uint, SimpleAdmitError> {
        self.capacity_remaining(tick)
    }
}
