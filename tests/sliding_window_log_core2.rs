use key_guard_core::rate_limiters::{SlidingWindowLogCore, MAX_LOG_CAPACITY};
use key_guard_core::{
    InvalidConfigError, RateLimiterCore, SlidingWindowLogCoreConfig, Uint, VerboseAdmitError,
};

#[test]
#[should_panic(expected = "requests_limit must not exceed MAX_LOG_CAPACITY")]
fn test_new_beyond_log_capacity() {
    SlidingWindowLogCore::new(MAX_LOG_CAPACITY + 1, 60);
}

#[test]
fn test_new_at_log_capacity() {
    let _ = SlidingWindowLogCore::new(MAX_LOG_CAPACITY, 60);
}

#[test]
fn test_with_config_validates() {
    assert!(SlidingWindowLogCore::with_config(&SlidingWindowLogCoreConfig::new(3, 5)).is_ok());

    assert_eq!(
        SlidingWindowLogCore::with_config(&SlidingWindowLogCoreConfig::new(0, 5)).err(),
        Some(InvalidConfigError::ZeroRequestsLimit)
    );
    assert_eq!(
        SlidingWindowLogCore::with_config(&SlidingWindowLogCoreConfig::new(3, 0)).err(),
        Some(InvalidConfigError::ZeroWindowTicks)
    );
    assert_eq!(
        SlidingWindowLogCore::with_config(&SlidingWindowLogCoreConfig::new(
            MAX_LOG_CAPACITY + 1,
            5
        ))
        .err(),
        Some(InvalidConfigError::LimitExceedsLogCapacity {
            requests_limit: MAX_LOG_CAPACITY + 1,
            log_capacity: MAX_LOG_CAPACITY,
        })
    );
}

#[test]
fn test_verbose_limit_exceeded_diagnostics() {
    let core = SlidingWindowLogCore::new(2, 10);

    assert_eq!(core.try_admit_verbose_at(0), Ok(()));
    assert_eq!(core.try_admit_verbose_at(1), Ok(()));

    // The oldest entry (tick 0) expires at tick 10, i.e. 5 ticks from now
    assert_eq!(
        core.try_admit_verbose_at(5),
        Err(VerboseAdmitError::LimitExceeded {
            limit: 2,
            in_window: 2,
            retry_after_ticks: 5,
        })
    );

    // One tick before expiry the wait shrinks to 1
    assert_eq!(
        core.try_admit_verbose_at(9),
        Err(VerboseAdmitError::LimitExceeded {
            limit: 2,
            in_window: 2,
            retry_after_ticks: 1,
        })
    );

    // At tick 10 the slot has freed
    assert_eq!(core.try_admit_verbose_at(10), Ok(()));
}

#[test]
fn test_verbose_expired_tick_diagnostics() {
    let core = SlidingWindowLogCore::new(5, 10);

    assert_eq!(core.try_admit_verbose_at(10), Ok(()));
    assert_eq!(
        core.try_admit_verbose_at(3),
        Err(VerboseAdmitError::ExpiredTick {
            min_acceptable_tick: 10
        })
    );
}

#[test]
fn test_verbose_zero_limit_never_retries() {
    let core = SlidingWindowLogCore::new(0, 10);

    // No slot can ever free, so the retry hint saturates
    assert_eq!(
        core.try_admit_verbose_at(7),
        Err(VerboseAdmitError::LimitExceeded {
            limit: 0,
            in_window: 0,
            retry_after_ticks: Uint::MAX,
        })
    );
}

#[test]
fn test_long_run_cycles_through_log_slots() {
    // Bursts separated by a full window: the ring's head wraps through
    // every slot many times and order must survive
    let core = SlidingWindowLogCore::new(3, 5);

    for round in 0u64..50 {
        let base: Uint = Uint::from(round) * 10;
        assert_eq!(core.try_admit_at(base), Ok(()), "round {}", round);
        assert_eq!(core.try_admit_at(base + 1), Ok(()), "round {}", round);
        assert_eq!(core.try_admit_at(base + 2), Ok(()), "round {}", round);
        assert_eq!(
            core.try_admit_at(base + 3).is_ok(),
            false,
            "round {} should be full",
            round
        );
    }
}

#[test]
fn test_trait_object_usage() {
    let core: Box<dyn RateLimiterCore> = Box::new(SlidingWindowLogCore::new(2, 10));

    assert_eq!(core.try_admit_at(0), Ok(()));
    assert_eq!(core.try_admit_at(1), Ok(()));
    assert!(core.try_admit_verbose_at(2).is_err());

    assert_eq!(core.capacity_remaining(3), Ok(0));
    assert_eq!(core.capacity_remaining_or_0(3), 0);

    // tick 10: the entry from tick 0 expires
    assert_eq!(core.capacity_remaining_or_0(10), 1);
}

#[test]
fn test_interleaved_admits_and_capacity_checks() {
    let core = SlidingWindowLogCore::new(2, 6);

    assert_eq!(core.capacity_remaining(0), Ok(2));
    assert_eq!(core.try_admit_at(0), Ok(()));
    assert_eq!(core.capacity_remaining(2), Ok(1));
    assert_eq!(core.try_admit_at(4), Ok(()));
    assert_eq!(core.capacity_remaining(5), Ok(0));

    // tick 6: the tick-0 entry is exactly one window old
    assert_eq!(core.capacity_remaining(6), Ok(1));
    assert_eq!(core.try_admit_at(6), Ok(()));
    assert_eq!(core.capacity_remaining(6), Ok(0));
}
