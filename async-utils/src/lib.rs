use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelErr {
    Cancelled,
}

/// Races a future against a cancellation token.
#[async_trait]
pub trait OrCancelExt: Sized {
    type Output;

    async fn or_cancel(self, token: &CancellationToken) -> Result<Self::Output, CancelErr>;
}

#[async_trait]
impl<F> OrCancelExt for F
where
    F: Future + Send,
    F::Output: Send,
{
    type Output = F::Output;

    async fn or_cancel(self, token: &CancellationToken) -> Result<Self::Output, CancelErr> {
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(CancelErr::Cancelled),
            output = self => Ok(output),
        }
    }
}

/// Waits out a quiet period, then runs `work`. Cancelling the token at any point
/// (during the wait or while `work` is in flight) drops the work and returns `Cancelled`.
pub async fn debounced<F>(
    quiet_period: Duration,
    token: &CancellationToken,
    work: F,
) -> Result<F::Output, CancelErr>
where
    F: Future + Send,
    F::Output: Send,
{
    tokio::time::sleep(quiet_period).or_cancel(token).await?;
    work.or_cancel(token).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn returns_output_when_not_cancelled() {
        let token = CancellationToken::new();
        let value = async { 42 }.or_cancel(&token).await;
        assert_eq!(value, Ok(42));
    }

    #[tokio::test]
    async fn already_cancelled_token_wins() {
        let token = CancellationToken::new();
        token.cancel();
        let value = async { 42 }.or_cancel(&token).await;
        assert_eq!(value, Err(CancelErr::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn debounced_work_runs_after_quiet_period() {
        let token = CancellationToken::new();
        let started = tokio::time::Instant::now();
        let value = debounced(Duration::from_millis(300), &token, async { "done" }).await;
        assert_eq!(value, Ok("done"));
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_during_quiet_period_skips_work() {
        let token = CancellationToken::new();
        let ran = Arc::new(AtomicBool::new(false));
        let task = {
            let token = token.clone();
            let ran = Arc::clone(&ran);
            tokio::spawn(async move {
                debounced(Duration::from_millis(300), &token, async move {
                    ran.store(true, Ordering::SeqCst);
                })
                .await
            })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
        let outcome = task.await.expect("task join");
        assert_eq!(outcome, Err(CancelErr::Cancelled));
        assert!(!ran.load(Ordering::SeqCst));
    }
}
