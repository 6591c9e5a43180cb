//! Core trait for rate limiter algorithms.
//!
//! This module defines the unified trait used by all rate limiter implementations.
//! It allows consistent use across sliding window log and future algorithm cores.

pub use crate::types::Uint;
use crate::{SimpleAdmitError, SimpleAdmitResult, VerboseAdmitResult};

/// The core trait implemented by all rate limiter algorithms.
///
/// This trait defines the essential operations available on any single-key
/// rate limiter core, supporting both simple and verbose (diagnostic)
/// usage patterns.
pub trait RateLimiterCore: Send + Sync {
    /// Attempts to admit one request at the given tick (fast-path).
    ///
    /// Returns immediately with a minimal error type ([`SimpleAdmitError`])
    /// for best performance.
    ///
    /// # Arguments
    /// * `tick` - Current time tick (from the application)
    ///
    /// # Returns
    /// * `Ok(())` if the request is allowed
    /// * `Err(SimpleAdmitError)` if denied or failed
    fn try_admit_at(&self, tick: Uint) -> SimpleAdmitResult;

    /// Attempts to admit one request at the given tick, returning detailed
    /// diagnostics (verbose-path).
    ///
    /// The verbose error type ([`crate::VerboseAdmitError`]) includes
    /// additional context such as current window occupancy and the required
    /// wait time. This is useful for backoff, logging, or advanced handling.
    ///
    /// # Arguments
    /// * `tick` - Current time tick (from the application)
    ///
    /// # Returns
    /// * `Ok(())` if the request is allowed
    /// * `Err(VerboseAdmitError)` with detailed info if denied or failed
    fn try_admit_verbose_at(&self, tick: Uint) -> VerboseAdmitResult;

    /// Returns the number of requests still admissible at the given tick.
    ///
    /// # Arguments
    /// * `tick` - Current time tick (from the application)
    fn capacity_remaining(&self, tick: Uint) -> Result<Uint, SimpleAdmitError>;

    /// Like [`capacity_remaining`](Self::capacity_remaining), but maps any
    /// failure to 0.
    fn capacity_remaining_or_0(&self, tick: Uint) -> Uint {
        self.capacity_remaining(tick).unwrap_or(0)
    }
}
