//! # Verdict aggregator.
//!
//! Converts the terminal states of all handles into the run's single outcome.
//!
//! ## Per-handle classification
//! ```text
//! Cancelled  + won by this run   → excluded (expected)
//! Cancelled  + not won           → external cancellation
//! Faulted(e)                     → failure(e)
//! CompletedNormally              → failure(Returned{task})
//! ```
//!
//! ## Policy
//! - any external cancellation → [`Verdict::Cancelled`]; included failures become lost faults
//! - exactly one failure       → [`RunError::Fault`] (not wrapped)
//! - several failures          → [`RunError::Multiple`] in input order

use crate::core::tracker::CancellationTracker;
use crate::error::{RunError, TaskFailure};
use crate::tasks::{TaskHandle, TaskStatus, TerminalState};

/// Outcome of aggregation.
#[derive(Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Propagate this error to the caller.
    Fault(RunError),
    /// Propagate a cancellation; remaining faults go to diagnostics.
    Cancelled,
}

/// Aggregates terminal states. Must be called only once every handle is terminal.
pub fn aggregate(tasks: &[TaskHandle], tracker: &CancellationTracker<'_>) -> Verdict {
    let mut failures = Vec::new();
    let mut external_cancel = false;

    for (idx, task) in tasks.iter().enumerate() {
        let TaskStatus::Terminated(state) = task.status() else {
            tracing::error!(task = task.name(), "aggregating a task that is not terminal");
            continue;
        };
        match state {
            TerminalState::Cancelled if tracker.won(idx) => {}
            TerminalState::Cancelled => {
                tracing::warn!(task = task.name(), "task was cancelled externally");
                external_cancel = true;
            }
            other => {
                if let Some(error) = other.fault(task.name()) {
                    failures.push(TaskFailure::new(task.name(), error));
                }
            }
        }
    }

    if external_cancel {
        return Verdict::Cancelled;
    }
    // the task that ended the first wait is never one we cancelled
    debug_assert!(!failures.is_empty(), "run finished without any deviating task");
    match failures.len() {
        0 => {
            tracing::error!("no task deviated; treating the run as cancelled");
            Verdict::Cancelled
        }
        1 => Verdict::Fault(RunError::Fault(failures.remove(0))),
        _ => Verdict::Fault(RunError::Multiple(failures)),
    }
}
