//! # Cancellation tracker.
//!
//! Requests cancellation of every supervised handle once and remembers, per handle,
//! whether *this run's* request was the one that initiated it. A handle whose request
//! was lost finished (or started stopping) for some other reason, and that reason must be
//! reported rather than suppressed.
//!
//! ## Rules
//! - `cancel_all` issues the requests at most once per run; later calls are no-ops
//! - every request is issued before anyone waits on any handle
//! - dropping an armed tracker (run future dropped mid-flight) still requests cancellation,
//!   so no task is left running unsupervised

use crate::tasks::TaskHandle;

/// Per-run cancellation bookkeeping.
pub struct CancellationTracker<'a> {
    tasks: &'a [TaskHandle],
    /// `won[i]` is `true` if our request initiated `tasks[i]`'s cancellation.
    won: Vec<bool>,
    requested: bool,
}

impl<'a> CancellationTracker<'a> {
    /// Creates an armed tracker; no requests are issued yet.
    pub fn new(tasks: &'a [TaskHandle]) -> Self {
        Self {
            tasks,
            won: vec![false; tasks.len()],
            requested: false,
        }
    }

    /// Requests cancellation of every handle, recording which requests won.
    pub fn cancel_all(&mut self) {
        if self.requested {
            return;
        }
        self.requested = true;
        for (won, task) in self.won.iter_mut().zip(self.tasks) {
            *won = task.request_cancel();
        }
        tracing::debug!(
            won = self.won.iter().filter(|w| **w).count(),
            total = self.tasks.len(),
            "cancellation requested on all tasks"
        );
    }

    /// Whether our request initiated the cancellation of `tasks[idx]`.
    pub fn won(&self, idx: usize) -> bool {
        self.won.get(idx).copied().unwrap_or(false)
    }

    /// Whether `cancel_all` has run.
    pub fn is_requested(&self) -> bool {
        self.requested
    }
}

impl Drop for CancellationTracker<'_> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_util::sync::CancellationToken;

    use crate::error::TaskError;
    use crate::tasks::TerminalState;

    fn blocked(name: &'static str) -> TaskHandle {
        TaskHandle::spawn_fn(name, |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            Err(TaskError::Canceled)
        })
    }

    #[tokio::test]
    async fn test_records_winners() {
        let tasks = [blocked("a"), blocked("b"), blocked("c")];
        // someone else got to "b" first
        assert!(tasks[1].request_cancel());

        let mut tracker = CancellationTracker::new(&tasks);
        tracker.cancel_all();
        assert!(tracker.won(0));
        assert!(!tracker.won(1));
        assert!(tracker.won(2));
    }

    #[tokio::test]
    async fn test_cancel_all_is_idempotent() {
        let tasks = [blocked("a")];
        let mut tracker = CancellationTracker::new(&tasks);
        tracker.cancel_all();
        tracker.cancel_all();
        assert!(tracker.won(0), "second pass must not overwrite the first result");
        assert_eq!(tasks[0].terminated().await, TerminalState::Cancelled);
    }

    #[tokio::test]
    async fn test_terminal_task_is_not_won() {
        let tasks = [TaskHandle::spawn_fn("done", |_ctx| async {
            Err(TaskError::fail("x"))
        })];
        tasks[0].terminated().await;
        let mut tracker = CancellationTracker::new(&tasks);
        tracker.cancel_all();
        assert!(!tracker.won(0));
    }

    #[tokio::test]
    async fn test_drop_requests_cancellation() {
        let tasks = [blocked("a"), blocked("b")];
        {
            let tracker = CancellationTracker::new(&tasks);
            assert!(!tracker.is_requested());
        }
        for t in &tasks {
            assert_eq!(t.terminated().await, TerminalState::Cancelled);
        }
    }
}
