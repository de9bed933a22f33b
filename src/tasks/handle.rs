//! # Handle to a spawned task.
//!
//! [`TaskHandle`] spawns a [`Task`] on the Tokio runtime and exposes the three capabilities a
//! supervisor needs: query status, request cooperative cancellation, await the terminal state.
//!
//! ## Rules
//! - Cancellation goes through [`TaskHandle::request_cancel`]; the task's token is private
//! - Exactly one `request_cancel` call ever returns `true`, and only while the task is running
//! - The "cancel requested" read and the terminal transition are a single atomic `fetch_or`, so a task
//!   cannot be both "stopped by us" and "finished on its own"
//! - Any number of callers may await [`TaskHandle::terminated`], before or after termination
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use perpetual::{TaskError, TaskHandle, TerminalState};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let h = TaskHandle::spawn_fn("idle", |ctx: CancellationToken| async move {
//!     ctx.cancelled().await;
//!     Err::<(), _>(TaskError::Canceled)
//! });
//!
//! assert!(h.request_cancel());
//! assert!(!h.request_cancel());
//! assert_eq!(h.terminated().await, TerminalState::Cancelled);
//! # }
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

use futures::FutureExt;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use crate::error::TaskError;
use crate::tasks::state::{Exit, TaskStatus, TerminalState};
use crate::tasks::task::TaskRef;
use crate::tasks::task_fn::TaskFn;

const RUNNING: u8 = 0;
/// Set by the single winning `request_cancel`.
const CANCEL_REQUESTED: u8 = 0b01;
/// Set by the terminal transition; never cleared.
const TERMINATED: u8 = 0b10;

struct Shared {
    name: String,
    phase: AtomicU8,
    /// Token handed to the task.
    token: CancellationToken,
    /// Published once, before `done` fires.
    terminal: OnceLock<TerminalState>,
    /// One-shot latch: cancelled when `terminal` is set.
    done: CancellationToken,
}

impl Shared {
    fn finish(&self, exit: Exit) {
        let prior = self.phase.fetch_or(TERMINATED, Ordering::AcqRel);
        if prior & TERMINATED != 0 {
            return;
        }
        let state = exit.classify(prior & CANCEL_REQUESTED != 0);
        let _ = self.terminal.set(state);
        self.done.cancel();
    }
}

/// Marks the task terminal even if its future is dropped before completing.
struct FinishGuard(Arc<Shared>);

impl Drop for FinishGuard {
    fn drop(&mut self) {
        // no-op if the task already finished
        self.0.finish(Exit::Dropped);
    }
}

/// Cloneable handle to an independently-scheduled task.
#[derive(Clone)]
pub struct TaskHandle {
    shared: Arc<Shared>,
}

impl TaskHandle {
    /// Spawns `task` on the current Tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn spawn(task: TaskRef) -> Self {
        let shared = Arc::new(Shared {
            name: task.name().to_string(),
            phase: AtomicU8::new(RUNNING),
            token: CancellationToken::new(),
            terminal: OnceLock::new(),
            done: CancellationToken::new(),
        });

        let guard = FinishGuard(Arc::clone(&shared));
        let ctx = shared.token.clone();
        tokio::spawn(async move {
            let exit = match AssertUnwindSafe(task.run(ctx)).catch_unwind().await {
                Ok(res) => Exit::Returned(res),
                Err(panic) => Exit::Panicked(panic_message(&*panic)),
            };
            guard.0.finish(exit);
        });

        Self { shared }
    }

    /// Spawns a closure-backed task. Shorthand for `spawn(TaskFn::arc(name, f))`.
    pub fn spawn_fn<F, Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        Self::spawn(TaskFn::arc(name, f))
    }

    /// Returns the task name.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Returns the current status.
    pub fn status(&self) -> TaskStatus {
        match self.shared.terminal.get() {
            Some(state) => TaskStatus::Terminated(state.clone()),
            // a task finishing on its own stays `Running` until its state is published
            None if self.shared.phase.load(Ordering::Acquire) & CANCEL_REQUESTED != 0 => {
                TaskStatus::Stopping
            }
            None => TaskStatus::Running,
        }
    }

    /// True once the terminal state is available.
    pub fn is_terminated(&self) -> bool {
        self.shared.terminal.get().is_some()
    }

    /// Requests cooperative cancellation.
    ///
    /// Returns `true` only for the single request that initiated cancellation. Requests on
    /// an already-cancelling or terminal task are no-ops and return `false`.
    pub fn request_cancel(&self) -> bool {
        let won = self
            .shared
            .phase
            .compare_exchange(RUNNING, CANCEL_REQUESTED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            self.shared.token.cancel();
        }
        won
    }

    /// Waits for the terminal state.
    pub async fn terminated(&self) -> TerminalState {
        loop {
            if let Some(state) = self.shared.terminal.get() {
                return state.clone();
            }
            self.shared.done.cancelled().await;
        }
    }

    /// Future resolving once the terminal state is published.
    pub(crate) fn finished(&self) -> WaitForCancellationFuture<'_> {
        self.shared.done.cancelled()
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("name", &self.shared.name)
            .field("status", &self.status())
            .finish()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
