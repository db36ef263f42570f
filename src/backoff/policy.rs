use rand::Rng;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

const PROPAGATION_INITIAL_INTERVAL: Duration = Duration::from_millis(500);
const PROPAGATION_MAX_ELAPSED: Duration = Duration::from_secs(10);
const JOIN_BASE_DELAY: Duration = Duration::from_millis(500);
const JOIN_ATTEMPTS: usize = 5;

/// Shape of a retry loop: how long to wait between attempts and when to stop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Delay before the second attempt.
    pub initial_interval: Duration,
    /// Growth factor applied to the delay after every failed attempt.
    pub multiplier: f64,
    /// Upper bound for the exponential part of the delay.
    pub max_interval: Duration,
    /// Random extra delay in `[0, max_jitter]` added to every sleep.
    pub max_jitter: Duration,
    /// Total wall-clock budget across attempts and sleeps.
    pub max_elapsed: Option<Duration>,
    /// Maximum number of attempts, including the first one.
    pub max_attempts: Option<usize>,
}

impl RetryPolicy {
    /// Policy for gossip and increment fan-out: give up after 10 seconds.
    pub fn propagation() -> Self {
        Self {
            initial_interval: PROPAGATION_INITIAL_INTERVAL,
            multiplier: 1.5,
            max_interval: Duration::from_secs(60),
            max_jitter: Duration::from_millis(250),
            max_elapsed: Some(PROPAGATION_MAX_ELAPSED),
            max_attempts: None,
        }
    }

    /// Policy for joining through a seed: 5 tries, doubling from 500ms.
    pub fn join() -> Self {
        Self {
            initial_interval: JOIN_BASE_DELAY,
            multiplier: 2.0,
            max_interval: Duration::from_secs(60),
            max_jitter: Duration::from_millis(100),
            max_elapsed: None,
            max_attempts: Some(JOIN_ATTEMPTS),
        }
    }

    /// Exponential part of the delay after `failures` failed attempts
    /// (`failures >= 1`), without jitter.
    pub fn base_delay(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(i32::MAX as u32) as i32;
        let initial_ms = self.initial_interval.as_millis() as f64;
        let cap_ms = self.max_interval.as_millis() as f64;
        let ms = (initial_ms * self.multiplier.powi(exponent)).min(cap_ms);
        Duration::from_millis(ms as u64)
    }

    fn jitter(&self) -> Duration {
        let max_ms = self.max_jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..=max_ms))
    }

    /// Full sleep after `failures` failed attempts.
    pub fn next_delay(&self, failures: u32) -> Duration {
        self.base_delay(failures) + self.jitter()
    }
}

/// Runs `operation` until it succeeds or `policy` runs out of budget.
///
/// Returns the first success, or the error of the last attempt.
pub async fn retry<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let started = Instant::now();
    let mut failures: u32 = 0;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        failures = failures.saturating_add(1);

        if let Some(max_attempts) = policy.max_attempts
            && failures as usize >= max_attempts
        {
            return Err(err);
        }

        let delay = policy.next_delay(failures);
        if let Some(budget) = policy.max_elapsed
            && started.elapsed() + delay > budget
        {
            return Err(err);
        }

        tracing::debug!("Attempt {} failed: {}. Retrying in {:?}", failures, err, delay);
        tokio::time::sleep(delay).await;
    }
}
