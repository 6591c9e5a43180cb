//! error.rs
//! Defines configuration errors plus simple and verbose admission error/result types.

use crate::types::Uint;
use thiserror::Error;

/// Error type for fast-path admission checks. No extra diagnostic information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimpleAdmitError {
    /// The key is at its request limit for the current window.
    #[error("Request limit reached for the current window.")]
    LimitExceeded,
    /// The key is longer than the maximum supported length.
    #[error("Key exceeds the maximum supported length.")]
    KeyTooLong,
    /// Provided tick is older than the last observed tick.
    #[error("Expired tick.")]
    ExpiredTick,
    /// Failed due to lock contention.
    #[error("Contention failure.")]
    ContentionFailure,
}

/// Result type for fast-path admission checks.
pub type SimpleAdmitResult = Result<(), SimpleAdmitError>;

/// Error type for verbose admission checks. Contains diagnostic information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerboseAdmitError {
    /// The key is at its request limit for the current window.
    ///
    /// `retry_after_ticks` is the number of ticks until the oldest recorded
    /// request expires and frees a slot. It saturates to `Uint::MAX` when
    /// the limit is zero and no request can ever be admitted.
    #[error("Request limit reached: {in_window} of {limit} request(s) in the current window, retry after {retry_after_ticks} tick(s).")]
    LimitExceeded {
        limit: Uint,
        in_window: Uint,
        retry_after_ticks: Uint,
    },
    /// The key is longer than the maximum supported length.
    #[error("Key length {length} exceeds the maximum of {max_length} bytes.")]
    KeyTooLong { length: usize, max_length: usize },
    /// Provided tick is older than the last observed tick.
    #[error("Expired tick: minimum acceptable tick is {min_acceptable_tick}.")]
    ExpiredTick { min_acceptable_tick: Uint },
    /// Failed due to lock contention.
    #[error("Contention failure: admission state is locked by another operation. Please retry.")]
    ContentionFailure,
}

/// Result type for verbose admission checks.
pub type VerboseAdmitResult = Result<(), VerboseAdmitError>;

impl From<VerboseAdmitError> for SimpleAdmitError {
    fn from(err: VerboseAdmitError) -> Self {
        match err {
            VerboseAdmitError::LimitExceeded { .. } => SimpleAdmitError::LimitExceeded,
            VerboseAdmitError::KeyTooLong { .. } => SimpleAdmitError::KeyTooLong,
            VerboseAdmitError::ExpiredTick { .. } => SimpleAdmitError::ExpiredTick,
            VerboseAdmitError::ContentionFailure => SimpleAdmitError::ContentionFailure,
        }
    }
}

/// Error type for rejected configurations.
///
/// Raised at configuration time and fatal to that configuration attempt.
/// Invalid values are never silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidConfigError {
    /// `requests_limit` is zero, which would deny every request.
    #[error("requests_limit must be greater than 0.")]
    ZeroRequestsLimit,
    /// `window_ticks` is zero, which would make every recorded request
    /// expire immediately.
    #[error("window_ticks must be greater than 0.")]
    ZeroWindowTicks,
    /// `requests_limit` exceeds the fixed capacity of the per-key log.
    #[error("requests_limit {requests_limit} exceeds the maximum log capacity {log_capacity}.")]
    LimitExceedsLogCapacity {
        requests_limit: Uint,
        log_capacity: Uint,
    },
}
