//! Per-key admission control for Rust applications.
//!
//! This library decides, for a stream of requests identified by an
//! arbitrary string key, whether each request is allowed, enforcing
//! "at most N requests per sliding window of T ticks" independently for
//! every key. The implementation is thread-safe and designed so that
//! distinct keys never contend with each other.
//!
//! # Quick Start
//!
//! ```rust
//! use key_guard_core::{KeyedRateLimiter, SlidingWindowLogCoreConfig};
//!
//! // Allow 3 requests per key per 5-tick window
//! let limiter = KeyedRateLimiter::new(SlidingWindowLogCoreConfig::new(3, 5)).unwrap();
//!
//! for tick in [0, 1, 2, 3, 4, 6] {
//!     match limiter.try_admit_at("user1", tick) {
//!         Ok(()) => println!("tick {tick}: request allowed"),
//!         Err(e) => println!("tick {tick}: request denied: {e}"),
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! ## [Keyed Rate Limiter](KeyedRateLimiter)
//! The front door: a sharded concurrent registry mapping each key to its
//! own sliding window log, created lazily on the key's first request.
//! Creation is atomic and deduplicated; admissions for the same key are
//! serialized by that log's own lock, never by a global one.
//!
//! ## [Sliding Window Log Core](rate_limiters::SlidingWindowLogCore)
//! One key's admission state. Usable on its own when there is only one
//! identity to limit:
//! ```rust
//! # use key_guard_core::rate_limiters::SlidingWindowLogCore;
//! let core = SlidingWindowLogCore::new(100, 60); // 100 requests per 60 ticks
//! assert_eq!(core.try_admit_at(0), Ok(()));
//! ```
//!
//! ## [Timestamp Log](rate_limiters::TimestampLog)
//! The fixed-capacity ring buffer of request ticks underneath each core.
//!
//! # Core Concepts
//!
//! ## Time Representation
//! All operations use abstract "ticks" supplied by the caller. This keeps
//! the crate deterministic and testable, and lets it work with any time
//! unit (seconds, milliseconds, etc.) by mapping your time source to tick
//! values. Ticks must be non-decreasing per key; an older tick is rejected
//! as [`ExpiredTick`](SimpleAdmitError::ExpiredTick).
//!
//! ## Error Handling
//! Admission checks come in two tiers: the fast path returns
//! [`SimpleAdmitError`] with no diagnostics, the verbose path returns
//! [`VerboseAdmitError`] with window occupancy and retry timing.
//! Configuration is validated up front and rejected with
//! [`InvalidConfigError`] rather than clamped.
//!
//! ## Thread Safety
//! All types are thread-safe and use non-blocking locks. If a key's lock
//! cannot be acquired immediately, `ContentionFailure` is returned rather
//! than blocking.
//!
//! ## Memory
//! Each key's log is allocated once, sized exactly to the configured
//! limit. The key set itself grows with distinct keys seen; call
//! [`KeyedRateLimiter::sweep_idle_at`] periodically to reclaim keys whose
//! window has drained.

pub mod types;
pub use types::Uint;

pub mod error;
pub use error::{
    InvalidConfigError, SimpleAdmitError, SimpleAdmitResult, VerboseAdmitError,
    VerboseAdmitResult,
};

pub mod config;
pub use config::SlidingWindowLogCoreConfig;

pub mod rate_limiter_core;
pub use rate_limiter_core::RateLimiterCore;

pub mod rate_limiters;

pub mod keyed_rate_limiter;
pub use keyed_rate_limiter::{KeyedRateLimiter, MAX_KEY_BYTES};
