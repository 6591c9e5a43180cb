use std::sync::Arc;
use std::thread;

use key_guard_core::{KeyedRateLimiter, SlidingWindowLogCoreConfig};

fn limiter(requests_limit: u64, window_ticks: u64) -> KeyedRateLimiter {
    KeyedRateLimiter::new(SlidingWindowLogCoreConfig::new(
        requests_limit.into(),
        window_ticks.into(),
    ))
    .unwrap()
}

#[test]
fn test_limiter_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KeyedRateLimiter>();
}

#[test]
fn test_distinct_keys_across_threads() {
    // Each thread drives its own key; per-key results must be exactly the
    // single-threaded ones since distinct keys never share a lock
    let limiter = Arc::new(limiter(3, 5));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let limiter = Arc::clone(&limiter);
            thread::spawn(move || {
                let key = format!("worker-{}", worker);
                let results: Vec<bool> = [0u64, 1, 2, 3, 4, 6]
                    .iter()
                    .map(|&tick| limiter.admit(&key, tick.into()))
                    .collect();
                results
            })
        })
        .collect();

    for handle in handles {
        let results = handle.join().unwrap();
        assert_eq!(results, vec![true, true, true, false, false, true]);
    }

    assert_eq!(limiter.len(), 8);
}

#[test]
fn test_shared_key_never_exceeds_limit() {
    // Many threads race on one key at the same tick. Some attempts may be
    // turned away by lock contention, but the number of admissions can
    // never exceed the limit, and at least one admission must succeed.
    let limiter = Arc::new(limiter(5, 100));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let limiter = Arc::clone(&limiter);
            thread::spawn(move || {
                let mut admitted = 0usize;
                for _ in 0..10 {
                    if limiter.admit("shared", 0) {
                        admitted += 1;
                    }
                }
                admitted
            })
        })
        .collect();

    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert!(total >= 1, "at least one admission must succeed");
    assert!(total <= 5, "admissions exceeded the limit: {}", total);
}

#[test]
fn test_racing_creation_is_deduplicated() {
    // All threads hit a never-seen key at once; exactly one log may exist
    // afterwards and the limit must hold across all of them
    let limiter = Arc::new(limiter(1, 100));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let limiter = Arc::clone(&limiter);
            thread::spawn(move || {
                let mut admitted = 0usize;
                for _ in 0..20 {
                    if limiter.admit("fresh-key", 0) {
                        admitted += 1;
                    }
                }
                admitted
            })
        })
        .collect();

    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(limiter.len(), 1);
    assert!(total >= 1);
    assert!(total <= 1, "duplicate logs admitted extra requests");
}

#[test]
fn test_sweep_removes_idle_keys() {
    let limiter = limiter(2, 5);

    assert!(limiter.admit("idle", 0));
    assert!(limiter.admit("active", 8));
    assert_eq!(limiter.len(), 2);

    // tick 8: "idle"'s only entry (tick 0) has expired; "active" still has
    // a live entry from tick 8
    assert_eq!(limiter.sweep_idle_at(8), 1);
    assert_eq!(limiter.len(), 1);

    // The swept key starts from a fresh, empty log
    assert!(limiter.admit("idle", 9));
}

#[test]
fn test_sweep_keeps_all_active_keys() {
    let limiter = limiter(2, 100);

    assert!(limiter.admit("a", 0));
    assert!(limiter.admit("b", 10));
    assert!(limiter.admit("c", 20));

    assert_eq!(limiter.sweep_idle_at(50), 0);
    assert_eq!(limiter.len(), 3);
}

#[test]
fn test_sweep_empty_registry() {
    let limiter = limiter(2, 5);
    assert_eq!(limiter.sweep_idle_at(100), 0);
    assert!(limiter.is_empty());
}

#[test]
fn test_sweep_then_reuse_key_at_later_tick() {
    let limiter = limiter(1, 5);

    assert!(limiter.admit("user1", 0));
    assert!(!limiter.admit("user1", 3));

    assert_eq!(limiter.sweep_idle_at(5), 1);

    // Recreated log has no memory of the old window or clock floor
    assert!(limiter.admit("user1", 2));
}
