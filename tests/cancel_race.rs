//! Stress tests for the "who won the cancellation" decision under real parallelism.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use perpetual::{TaskError, TaskHandle, TerminalState};
use tokio::sync::Barrier;
use tokio_util::sync::CancellationToken;

const ROUNDS: usize = 200;
const CANCELLERS: usize = 8;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn exactly_one_canceller_wins() {
    for round in 0..ROUNDS {
        let handle = TaskHandle::spawn_fn("idle", |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            Err(TaskError::Canceled)
        });
        let barrier = Arc::new(Barrier::new(CANCELLERS));
        let wins = Arc::new(AtomicUsize::new(0));

        let mut joins = Vec::with_capacity(CANCELLERS);
        for _ in 0..CANCELLERS {
            let (h, b, w) = (handle.clone(), barrier.clone(), wins.clone());
            joins.push(tokio::spawn(async move {
                b.wait().await;
                if h.request_cancel() {
                    w.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }
        for j in joins {
            j.await.unwrap();
        }

        assert_eq!(wins.load(Ordering::SeqCst), 1, "round {round}");
        assert_eq!(handle.terminated().await, TerminalState::Cancelled);
        assert!(!handle.request_cancel(), "round {round}: terminal handle won");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn cancel_racing_normal_return_is_consistent() {
    for round in 0..ROUNDS {
        let barrier = Arc::new(Barrier::new(2));
        let task_barrier = barrier.clone();
        let handle = TaskHandle::spawn_fn("racer", move |_ctx: CancellationToken| {
            let b = task_barrier.clone();
            async move {
                b.wait().await;
                Ok(())
            }
        });

        let h = handle.clone();
        let canceller = tokio::spawn(async move {
            barrier.wait().await;
            h.request_cancel()
        });
        let won = canceller.await.unwrap();
        let state = handle.terminated().await;

        if won {
            assert_eq!(state, TerminalState::Cancelled, "round {round}");
        } else {
            assert_eq!(state, TerminalState::CompletedNormally, "round {round}");
        }
    }
}
