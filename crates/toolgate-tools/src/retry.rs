//! Bounded fixed-delay retry for fallible async operations.

use async_trait::async_trait;
use log::warn;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Suspend-for-duration primitive used between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend the calling task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Terminal outcome of a retried operation that never succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryError<E> {
    /// Every attempt failed; `last` is the final failure, unchanged.
    Exhausted { attempts: u32, last: E },
    /// The caller's deadline fired before the next attempt could start.
    Cancelled { attempts: u32, last: E },
}

impl<E> RetryError<E> {
    /// Number of attempts that actually ran.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } | RetryError::Cancelled { attempts, .. } => {
                *attempts
            }
        }
    }

    /// Consume the error and return the most recent failure.
    pub fn into_last(self) -> E {
        match self {
            RetryError::Exhausted { last, .. } | RetryError::Cancelled { last, .. } => last,
        }
    }
}

/// Retry policy: up to `max_attempts` runs with a fixed `delay` between them.
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    sleeper: Arc<dyn Sleeper>,
}

impl std::fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("delay", &self.delay)
            .finish()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(100))
    }
}

impl RetryPolicy {
    /// Create a policy using the tokio timer. `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replace the sleeping primitive.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `operation` until it succeeds, attempts run out, or `cancel` fires.
    ///
    /// The closure receives the 1-based attempt number. Exactly
    /// `attempts - 1` delays are taken. Cancellation is checked before each
    /// retry and raced against the delay, never after a full sleep.
    pub async fn run<T, E, F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut operation: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 1;
        loop {
            let err = match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            warn!(
                "attempt failed (attempt={}, max_attempts={}, error={})",
                attempt, self.max_attempts, err
            );
            if attempt >= self.max_attempts {
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    last: err,
                });
            }
            if cancel.is_cancelled() {
                return Err(RetryError::Cancelled {
                    attempts: attempt,
                    last: err,
                });
            }
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(RetryError::Cancelled { attempts: attempt, last: err });
                }
                _ = self.sleeper.sleep(self.delay) => {}
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RetryError, RetryPolicy};
    use crate::builtins::test_support::CountingSleeper;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn policy(sleeper: &Arc<CountingSleeper>) -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(100)).with_sleeper(sleeper.clone())
    }

    #[tokio::test]
    async fn succeeds_after_two_failures_with_two_delays() {
        let sleeper = Arc::new(CountingSleeper::default());
        let result: Result<&str, RetryError<String>> = policy(&sleeper)
            .run(&CancellationToken::new(), |attempt| async move {
                if attempt < 3 {
                    Err(format!("failure {attempt}"))
                } else {
                    Ok("done")
                }
            })
            .await;
        assert_eq!(result, Ok("done"));
        assert_eq!(
            sleeper.sleeps(),
            vec![Duration::from_millis(100), Duration::from_millis(100)]
        );
    }

    #[tokio::test]
    async fn surfaces_last_failure_unchanged() {
        let sleeper = Arc::new(CountingSleeper::default());
        let result: Result<(), RetryError<String>> = policy(&sleeper)
            .run(&CancellationToken::new(), |attempt| async move {
                Err(format!("failure {attempt}"))
            })
            .await;
        assert_eq!(
            result,
            Err(RetryError::Exhausted {
                attempts: 3,
                last: "failure 3".to_string()
            })
        );
        assert_eq!(sleeper.count(), 2);
    }

    #[tokio::test]
    async fn first_success_takes_no_delay() {
        let sleeper = Arc::new(CountingSleeper::default());
        let result: Result<u8, RetryError<String>> = policy(&sleeper)
            .run(&CancellationToken::new(), |_| async { Ok(7) })
            .await;
        assert_eq!(result, Ok(7));
        assert!(sleeper.sleeps().is_empty());
    }

    #[tokio::test]
    async fn single_attempt_policy_never_sleeps() {
        let sleeper = Arc::new(CountingSleeper::default());
        let policy = RetryPolicy::new(0, Duration::from_millis(5)).with_sleeper(sleeper.clone());
        assert_eq!(policy.max_attempts(), 1);
        let result: Result<(), RetryError<&str>> = policy
            .run(&CancellationToken::new(), |_| async { Err("boom") })
            .await;
        assert_eq!(result.unwrap_err().attempts(), 1);
        assert!(sleeper.sleeps().is_empty());
    }

    #[tokio::test]
    async fn cancelled_token_stops_before_retry() {
        let sleeper = Arc::new(CountingSleeper::default());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result: Result<(), RetryError<&str>> = policy(&sleeper)
            .run(&cancel, |_| async { Err("flaky") })
            .await;
        assert_eq!(
            result,
            Err(RetryError::Cancelled {
                attempts: 1,
                last: "flaky"
            })
        );
        assert!(sleeper.sleeps().is_empty());
    }

    #[tokio::test]
    async fn cancellation_interrupts_the_delay() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let policy = RetryPolicy::new(3, Duration::from_secs(60));
        let handle = tokio::spawn(async move {
            policy
                .run(&cancel, |_| async { Err::<(), _>("slow backend") })
                .await
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("cancelled promptly")
            .expect("join");
        assert!(matches!(result, Err(RetryError::Cancelled { attempts: 1, .. })));
    }
}
