//! Core rate limiting algorithm implementations.
//!
//! This module contains the per-key building blocks of the keyed limiter:
//! the fixed-capacity [`TimestampLog`] ring buffer and the
//! [`SlidingWindowLogCore`] admission algorithm built on top of it.
//!
//! # Sliding Window Log
//!
//! The sliding window log records the exact tick of every admitted request
//! and evicts entries as they age out of the trailing window. It is exact
//! (no fixed-bucket boundary artifacts) at the cost of one log slot per
//! admitted request, bounded by the configured limit.
//!
//! # Thread Safety
//!
//! The core uses an internal mutex and provides thread-safe operations
//! through `try_admit_at`, which may return `ContentionFailure` if the
//! lock cannot be acquired immediately.

pub mod timestamp_log;
pub use timestamp_log::TimestampLog;

pub mod sliding_window_log_core;
pub use sliding_window_log_core::SlidingWindowLogCore;
pub use sliding_window_log_core::MAX_LOG_CAPACITY;
