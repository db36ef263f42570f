//! Retry & Backoff Tests
//!
//! Runs on tokio's paused clock, so multi-second backoff schedules finish
//! instantly while `Instant::elapsed` still reports virtual time.

#[cfg(test)]
mod tests {
    use crate::backoff::{RetryPolicy, retry};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    fn no_jitter(mut policy: RetryPolicy) -> RetryPolicy {
        policy.max_jitter = Duration::ZERO;
        policy
    }

    // ============================================================
    // DELAY SCHEDULE
    // ============================================================

    #[test]
    fn test_propagation_delays_grow_exponentially() {
        let policy = no_jitter(RetryPolicy::propagation());

        assert_eq!(policy.next_delay(1), Duration::from_millis(500));
        assert_eq!(policy.next_delay(2), Duration::from_millis(750));
        assert_eq!(policy.next_delay(3), Duration::from_millis(1125));
    }

    #[test]
    fn test_join_delays_double() {
        let policy = no_jitter(RetryPolicy::join());

        assert_eq!(policy.next_delay(1), Duration::from_millis(500));
        assert_eq!(policy.next_delay(2), Duration::from_millis(1000));
        assert_eq!(policy.next_delay(4), Duration::from_millis(4000));
    }

    #[test]
    fn test_delay_is_capped_by_max_interval() {
        let mut policy = no_jitter(RetryPolicy::join());
        policy.max_interval = Duration::from_secs(3);

        assert_eq!(policy.next_delay(10), Duration::from_secs(3));
        // Large exponents must not overflow
        assert_eq!(policy.next_delay(u32::MAX), Duration::from_secs(3));
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let policy = RetryPolicy::join();

        for _ in 0..200 {
            let delay = policy.next_delay(1);
            assert!(delay >= Duration::from_millis(500));
            assert!(delay <= Duration::from_millis(600), "delay {:?} too long", delay);
        }
    }

    // ============================================================
    // RETRY LOOP
    // ============================================================

    #[tokio::test(start_paused = true)]
    async fn test_retry_returns_first_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let result: Result<&str, String> = retry(&RetryPolicy::propagation(), move || {
            let calls = calls_clone.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(format!("failure {}", n))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_succeeding_immediately_does_not_sleep() {
        let started = Instant::now();

        let result: Result<u32, String> =
            retry(&RetryPolicy::propagation(), || async { Ok(7) }).await;

        assert_eq!(result, Ok(7));
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_gives_up_after_elapsed_budget() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let started = Instant::now();

        let result: Result<(), String> = retry(&RetryPolicy::propagation(), move || {
            let calls = calls_clone.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Err(format!("failure {}", n))
            }
        })
        .await;

        let attempts = calls.load(Ordering::SeqCst);
        assert_eq!(result, Err(format!("failure {}", attempts - 1)));
        assert!(attempts > 1, "should retry at least once, got {}", attempts);
        assert!(
            started.elapsed() <= Duration::from_secs(10),
            "exceeded budget: {:?}",
            started.elapsed()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_respects_attempt_limit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let result: Result<(), &str> = retry(&RetryPolicy::join(), move || {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("refused")
            }
        })
        .await;

        assert_eq!(result, Err("refused"));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }
}
