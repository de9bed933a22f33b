//! # Supervisor: keeps a fixed set of perpetual tasks alive, or tears them all down.
//!
//! A [`Supervisor`] run watches the handles it was given. The first handle that stops for any
//! reason ends the run: every sibling is cancelled, the run waits for all of them to finish
//! their cleanup, and then reports one verdict.
//!
//! ## Phases
//! ```text
//! AwaitingFirstCompletion ──► CancellingPeers ──► AwaitingAllCompletions ──► Aggregating ──► Done
//!          │                                               │                      │
//!          │ caller cancelled                              │ caller cancelled     │ external task
//!          ▼                                               ▼                      ▼ cancellation
//!          └──────────────► PropagatingOwnCancellation ◄───┴──────────────────────┘
//!                                      │
//!                                      ├─► cancel all (no-op if already done)
//!                                      ├─► grace wait: all handles terminal (once)
//!                                      ├─► report faults to Diagnostics
//!                                      └─► Err(RunError::Cancelled)
//! ```
//!
//! ## Rules
//! - Cancellation is requested on **every** handle before the run waits for any of them
//! - The run never returns while a handle is non-terminal (unless its future is dropped)
//! - A caller cancellation that is ready together with a task completion wins (`biased`)
//! - On the cancellation path, non-cancelled terminal states are reported as lost faults
//! - Dropping the run future still requests cancellation of every handle and reports the
//!   faults of handles that are already terminal; handles still running are not awaited
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use perpetual::{RunError, Supervisor, SupervisorConfig, TaskError, TaskHandle};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let ticker = TaskHandle::spawn_fn("ticker", |ctx: CancellationToken| async move {
//!     ctx.cancelled().await;
//!     Err(TaskError::Canceled)
//! });
//! let broken = TaskHandle::spawn_fn("broken", |_ctx: CancellationToken| async move {
//!     Err(TaskError::fail("disk full"))
//! });
//!
//! let sup = Supervisor::new(SupervisorConfig::default());
//! let verdict = sup.run(&[ticker.clone(), broken], &CancellationToken::new()).await;
//!
//! let Err(RunError::Fault(failure)) = verdict else { unreachable!() };
//! assert_eq!(failure.task, "broken");
//! assert!(ticker.is_terminated());
//! # }
//! ```

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::config::SupervisorConfig;
use crate::core::builder::SupervisorBuilder;
use crate::core::tracker::CancellationTracker;
use crate::core::verdict::{self, Verdict};
use crate::core::waiter;
use crate::diagnostics::{Diagnostics, LogWriter};
use crate::error::RunError;
use crate::tasks::{TaskHandle, TaskStatus};

/// Phases of a single run (recorded in debug logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingFirstCompletion,
    CancellingPeers,
    AwaitingAllCompletions,
    Aggregating,
    PropagatingOwnCancellation,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::AwaitingFirstCompletion => "awaiting_first_completion",
            Phase::CancellingPeers => "cancelling_peers",
            Phase::AwaitingAllCompletions => "awaiting_all_completions",
            Phase::Aggregating => "aggregating",
            Phase::PropagatingOwnCancellation => "propagating_own_cancellation",
        };
        f.write_str(s)
    }
}

/// Supervises fixed sets of perpetual tasks. Holds no state between runs.
pub struct Supervisor {
    cfg: SupervisorConfig,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Supervisor {
    /// Creates a supervisor that logs lost faults through [`LogWriter`].
    pub fn new(cfg: SupervisorConfig) -> Self {
        Self::new_internal(cfg, Arc::new(LogWriter))
    }

    /// Returns a builder for customizing diagnostics.
    pub fn builder(cfg: SupervisorConfig) -> SupervisorBuilder {
        SupervisorBuilder::new(cfg)
    }

    pub(crate) fn new_internal(cfg: SupervisorConfig, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self { cfg, diagnostics }
    }

    /// Supervises `tasks` until one of them stops, or until `cancel` fires.
    ///
    /// Never returns `Ok`. The error is the run's verdict:
    /// - [`RunError::Fault`]: a single task failed or returned;
    /// - [`RunError::Multiple`]: several tasks failed, in the order of `tasks`;
    /// - [`RunError::Cancelled`]: `cancel` fired, or a task was cancelled by someone else;
    /// - [`RunError::NoTasks`]: `tasks` is empty.
    ///
    /// By the time this returns every handle in `tasks` is terminal.
    pub async fn run(
        &self,
        tasks: &[TaskHandle],
        cancel: &CancellationToken,
    ) -> Result<Infallible, RunError> {
        if tasks.is_empty() {
            return Err(RunError::NoTasks);
        }
        let span = tracing::info_span!(
            "supervisor.run",
            name = %self.cfg.name,
            tasks = tasks.len(),
            diagnostics = self.diagnostics.name(),
        );
        let verdict = self.drive(tasks, cancel).instrument(span).await;
        Err(verdict)
    }

    async fn drive(&self, tasks: &[TaskHandle], cancel: &CancellationToken) -> RunError {
        let mut lost = LostFaults {
            tasks,
            diagnostics: Some(&*self.diagnostics),
        };
        let mut tracker = CancellationTracker::new(tasks);

        enter(Phase::AwaitingFirstCompletion);
        let interrupted = tokio::select! {
            biased;
            _ = cancel.cancelled() => true,
            _ = waiter::first(tasks) => false,
        };

        enter(Phase::CancellingPeers);
        tracker.cancel_all();

        if !interrupted {
            enter(Phase::AwaitingAllCompletions);
            let all_done = tokio::select! {
                biased;
                _ = cancel.cancelled() => false,
                _ = waiter::all(tasks) => true,
            };

            if all_done {
                enter(Phase::Aggregating);
                debug_assert!(tracker.is_requested());
                if let Verdict::Fault(err) = verdict::aggregate(tasks, &tracker) {
                    tracing::debug!(label = err.as_label(), "run finished");
                    lost.disarm();
                    return err;
                }
            }
        }

        enter(Phase::PropagatingOwnCancellation);
        // single grace period; a no-op if every task is already terminal
        waiter::all(tasks).await;
        tracing::debug!("run cancelled");
        RunError::Cancelled
    }
}

fn enter(phase: Phase) {
    tracing::debug!(%phase, "supervisor phase");
}

/// Reports faults of terminal tasks when dropped, unless the run returned a fault verdict.
///
/// Covers both the end of the grace wait and a run future dropped at any suspension point.
struct LostFaults<'a> {
    tasks: &'a [TaskHandle],
    diagnostics: Option<&'a dyn Diagnostics>,
}

impl LostFaults<'_> {
    /// The verdict carries the faults; nothing is lost.
    fn disarm(&mut self) {
        self.diagnostics = None;
    }
}

impl Drop for LostFaults<'_> {
    fn drop(&mut self) {
        let Some(diagnostics) = self.diagnostics else {
            return;
        };
        for task in self.tasks {
            match task.status() {
                TaskStatus::Terminated(state) => {
                    if let Some(error) = state.fault(task.name()) {
                        diagnostics.lost_fault(task.name(), &error);
                    }
                }
                TaskStatus::Running | TaskStatus::Stopping => {
                    tracing::warn!(task = task.name(), "task still running after run ended");
                }
            }
        }
    }
}
