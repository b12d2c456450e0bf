//! Bounded retry policy with exponential backoff and jitter.
//!
//! Shared by the workbook downloader (HTTP 429/5xx/transport errors) and the
//! embedding pass (transient backend failures). Callers classify their own
//! errors; the policy only decides how long to wait and when to give up.

use std::time::Duration;

use rand::Rng;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 250,
            max_backoff_ms: 2_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retryable,
    Fatal,
}

impl RetryPolicy {
    /// Delay before the given retry attempt (1-based): exponential in the
    /// attempt number, capped at `max_backoff_ms`, plus up to 10% jitter so
    /// simultaneous retries don't synchronize against the same endpoint.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = 2u64.saturating_pow(attempt.saturating_sub(1));
        let base = self
            .initial_backoff_ms
            .saturating_mul(exponent)
            .min(self.max_backoff_ms);
        let jitter_cap = (base / 10).max(1);
        let jitter = rand::rng().random_range(0..jitter_cap);
        Duration::from_millis(base.saturating_add(jitter))
    }

    /// Run a synchronous operation under this policy. `classify` decides
    /// whether a failure is worth another attempt; fatal errors and the final
    /// attempt's error propagate unchanged.
    pub fn run_sync<T, E, Op, Classify>(&self, mut op: Op, classify: Classify) -> Result<T, E>
    where
        Op: FnMut() -> Result<T, E>,
        E: std::fmt::Display,
        Classify: Fn(&E) -> RetryDecision,
    {
        let attempts = self.max_attempts.max(1);
        for attempt in 1..=attempts {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if classify(&err) == RetryDecision::Fatal || attempt == attempts {
                        return Err(err);
                    }
                    let delay = self.delay_for(attempt);
                    log::warn!(
                        "retry {}/{} after error: {} (sleep {:?})",
                        attempt,
                        attempts,
                        err,
                        delay
                    );
                    std::thread::sleep(delay);
                }
            }
        }
        unreachable!("loop returns on final attempt");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_delay_growth_and_cap() {
        let policy = RetryPolicy {
            max_attempts: 5,
            initial_backoff_ms: 100,
            max_backoff_ms: 400,
        };

        // Exponential up to the cap; jitter adds at most 10% on top.
        let d1 = policy.delay_for(1).as_millis() as u64;
        let d2 = policy.delay_for(2).as_millis() as u64;
        let d4 = policy.delay_for(4).as_millis() as u64;
        assert!((100..110).contains(&d1), "attempt 1 delay {}", d1);
        assert!((200..220).contains(&d2), "attempt 2 delay {}", d2);
        assert!((400..440).contains(&d4), "capped delay {}", d4);
    }

    #[test]
    fn test_run_sync_recovers_after_transient_failures() {
        let policy = RetryPolicy {
            max_attempts: 3,
            initial_backoff_ms: 1,
            max_backoff_ms: 2,
        };
        let calls = Cell::new(0u32);

        let result: Result<u32, String> = policy.run_sync(
            || {
                calls.set(calls.get() + 1);
                if calls.get() < 3 {
                    Err("transient".to_string())
                } else {
                    Ok(42)
                }
            },
            |_| RetryDecision::Retryable,
        );

        assert_eq!(result, Ok(42));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_run_sync_gives_up_after_max_attempts() {
        let policy = RetryPolicy {
            max_attempts: 2,
            initial_backoff_ms: 1,
            max_backoff_ms: 2,
        };
        let calls = Cell::new(0u32);

        let result: Result<u32, String> = policy.run_sync(
            || {
                calls.set(calls.get() + 1);
                Err("still down".to_string())
            },
            |_| RetryDecision::Retryable,
        );

        assert!(result.is_err());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_run_sync_fatal_errors_do_not_retry() {
        let policy = RetryPolicy::default();
        let calls = Cell::new(0u32);

        let result: Result<u32, String> = policy.run_sync(
            || {
                calls.set(calls.get() + 1);
                Err("bad request".to_string())
            },
            |_| RetryDecision::Fatal,
        );

        assert!(result.is_err());
        assert_eq!(calls.get(), 1, "fatal error must not be retried");
    }
}
