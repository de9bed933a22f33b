//! # Completion waiter.
//!
//! Suspends until one (or all) of the supervised handles reach a terminal state.
//! Both waits park on the handles' one-shot "finished" latches; nothing polls.
//!
//! Neither function inspects *which* state was reached; that is the aggregator's job.
//! Both are cancel-safe: dropping the future (e.g. losing a `select!`) has no side effects.

use futures::future::{join_all, select_all};

use crate::tasks::TaskHandle;

/// Resolves as soon as at least one handle is terminal.
///
/// Returns immediately for an empty slice.
pub async fn first(tasks: &[TaskHandle]) {
    if tasks.is_empty() {
        return;
    }
    let waits = tasks.iter().map(|t| Box::pin(t.finished()));
    let _ = select_all(waits).await;
}

/// Resolves once every handle is terminal.
pub async fn all(tasks: &[TaskHandle]) {
    join_all(tasks.iter().map(TaskHandle::finished)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    use crate::error::TaskError;

    fn blocked(name: &'static str) -> TaskHandle {
        TaskHandle::spawn_fn(name, |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            Err(TaskError::Canceled)
        })
    }

    #[tokio::test]
    async fn test_first_returns_on_one_completion() {
        let tasks = [
            blocked("a"),
            TaskHandle::spawn_fn("b", |_ctx| async { Err(TaskError::fail("b")) }),
        ];
        first(&tasks).await;
        assert!(tasks[1].is_terminated());
        assert!(!tasks[0].is_terminated());
        tasks[0].request_cancel();
        all(&tasks).await;
    }

    #[tokio::test]
    async fn test_first_does_not_resolve_while_all_block() {
        let tasks = [blocked("a"), blocked("b")];
        let res = tokio::time::timeout(Duration::from_millis(30), first(&tasks)).await;
        assert!(res.is_err(), "no task finished, wait must stay pending");
        for t in &tasks {
            t.request_cancel();
        }
        all(&tasks).await;
        assert!(tasks.iter().all(TaskHandle::is_terminated));
    }
}
