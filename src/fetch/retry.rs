use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::error::{GitHubError, GitHubResult};

/// Outcome of a retried operation that ran out of schedule without a fatal
/// error. Exhaustion is not a failure: the caller treats it as the end of
/// the stream and whatever was yielded so far stands as valid output.
#[derive(Debug)]
pub enum RetryOutcome<T> {
    Success(T),
    Exhausted,
}

/// Bounded, delay-scheduled retry around a single fallible async operation.
///
/// The schedule length caps the number of requests: a schedule of N delays
/// allows N attempts of the same operation. Failures the classifier rejects
/// propagate immediately; transient ones wait `schedule[failures]` seconds
/// (indexed with the already-incremented counter) and try again.
pub struct RetryPolicy {
    schedule: Vec<u64>,
    classify: fn(&GitHubError) -> bool,
}

impl RetryPolicy {
    pub fn new(schedule: Vec<u64>) -> Self {
        Self {
            schedule,
            classify: GitHubError::is_transient,
        }
    }

    /// Swap the transient-failure classifier. The retry mechanics are
    /// independent of what counts as retryable.
    pub fn with_classifier(mut self, classify: fn(&GitHubError) -> bool) -> Self {
        self.classify = classify;
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.schedule.len()
    }

    /// Drive `op` until it succeeds, exhausts the schedule, or fails fatally.
    /// The operation receives the number of failures so far (0 on the first
    /// attempt). The delay is a real suspension point: dropping the returned
    /// future cancels an in-flight wait.
    pub async fn run<T, Op, Fut>(&self, mut op: Op) -> GitHubResult<RetryOutcome<T>>
    where
        Op: FnMut(u32) -> Fut,
        Fut: Future<Output = GitHubResult<T>>,
    {
        let mut failures: usize = 0;

        loop {
            match op(failures as u32).await {
                Ok(value) => return Ok(RetryOutcome::Success(value)),
                Err(err) if (self.classify)(&err) => {
                    eprintln!("Transient error during query: {}", err);

                    failures += 1;
                    if failures >= self.schedule.len() {
                        eprintln!(
                            "Retry limit of {} reached. Stopping.",
                            self.schedule.len()
                        );
                        return Ok(RetryOutcome::Exhausted);
                    }

                    let delay = self.schedule[failures];
                    eprintln!("Waiting {} seconds before retrying...", delay);
                    sleep(Duration::from_secs(delay)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn transient() -> GitHubError {
        GitHubError::ApiError("HTTP error: 502 Bad Gateway".to_string())
    }

    fn fatal() -> GitHubError {
        GitHubError::GraphQLError("bad schema".to_string())
    }

    #[tokio::test]
    async fn test_first_attempt_success_never_sleeps() {
        let policy = RetryPolicy::new(vec![30, 30, 30]);
        let outcome = policy.run(|attempt| async move { Ok::<_, GitHubError>(attempt) }).await.unwrap();
        match outcome {
            RetryOutcome::Success(attempt) => assert_eq!(attempt, 0),
            RetryOutcome::Exhausted => panic!("expected success"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_failures_then_success_waits_twice() {
        let policy = RetryPolicy::new(vec![30, 30, 30]);
        let calls = Cell::new(0u32);
        let start = tokio::time::Instant::now();

        let outcome = policy
            .run(|attempt| {
                calls.set(calls.get() + 1);
                async move {
                    if attempt < 2 {
                        Err(transient())
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await
            .unwrap();

        assert!(matches!(outcome, RetryOutcome::Success(2)));
        assert_eq!(calls.get(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_after_schedule_length_attempts() {
        let policy = RetryPolicy::new(vec![30, 30, 30]);
        let calls = Cell::new(0u32);

        let outcome = policy
            .run(|_| {
                calls.set(calls.get() + 1);
                async { Err::<(), _>(transient()) }
            })
            .await
            .unwrap();

        assert!(matches!(outcome, RetryOutcome::Exhausted));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_fatal_error_propagates_without_retry() {
        let policy = RetryPolicy::new(vec![30, 30, 30]);
        let calls = Cell::new(0u32);

        let result = policy
            .run(|_| {
                calls.set(calls.get() + 1);
                async { Err::<(), _>(fatal()) }
            })
            .await;

        assert!(matches!(result, Err(GitHubError::GraphQLError(_))));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_empty_schedule_gives_up_immediately() {
        let policy = RetryPolicy::new(Vec::new());
        let outcome = policy.run(|_| async { Err::<(), _>(transient()) }).await.unwrap();
        assert!(matches!(outcome, RetryOutcome::Exhausted));
    }

    #[tokio::test]
    async fn test_custom_classifier_overrides_default() {
        // Treat nothing as transient: even an HTTP status error is fatal.
        let policy = RetryPolicy::new(vec![30]).with_classifier(|_| false);
        let result = policy.run(|_| async { Err::<(), _>(transient()) }).await;
        assert!(matches!(result, Err(GitHubError::ApiError(_))));
    }
}
