//! # Observable state of a spawned task.
//!
//! ```text
//!            request_cancel() wins
//!  Running ───────────────────────────► Stopping
//!     │                                    │
//!     │ task finishes                      │ task finishes
//!     ▼                                    ▼
//!  Terminated(CompletedNormally |     Terminated(Cancelled |
//!             Faulted | Cancelled)               Faulted)
//! ```
//!
//! ## Rules
//! - `Ok(())` counts as [`TerminalState::Cancelled`] only if cancellation was requested first
//! - `Err(Canceled)` is always [`TerminalState::Cancelled`]
//! - a dropped task future (runtime shutdown, abort) is [`TerminalState::Cancelled`]

use crate::error::TaskError;

/// Final disposition of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalState {
    /// The task's work raised an error (possibly during cleanup).
    Faulted(TaskError),
    /// The task returned without being asked to stop.
    CompletedNormally,
    /// The task stopped in response to a cancellation.
    Cancelled,
}

impl TerminalState {
    /// True for [`TerminalState::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TerminalState::Cancelled)
    }

    /// Returns the fault this state stands for, if any.
    ///
    /// Normal completion of a perpetual task is itself a fault, so it is converted into
    /// [`TaskError::Returned`] naming `task`.
    pub fn fault(&self, task: &str) -> Option<TaskError> {
        match self {
            TerminalState::Faulted(err) => Some(err.clone()),
            TerminalState::CompletedNormally => Some(TaskError::Returned {
                task: task.to_string(),
            }),
            TerminalState::Cancelled => None,
        }
    }
}

/// Current status of a task handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Not terminal, no cancellation requested.
    Running,
    /// Cancellation requested; not terminal yet.
    Stopping,
    /// Terminal.
    Terminated(TerminalState),
}

/// How the task's future ended.
#[derive(Debug)]
pub(crate) enum Exit {
    Returned(Result<(), TaskError>),
    Panicked(String),
    Dropped,
}

impl Exit {
    /// Classifies the exit. `cancel_requested` must be read atomically with the
    /// handle's terminal transition.
    pub(crate) fn classify(self, cancel_requested: bool) -> TerminalState {
        match self {
            Exit::Returned(Ok(())) if cancel_requested => TerminalState::Cancelled,
            Exit::Returned(Ok(())) => TerminalState::CompletedNormally,
            Exit::Returned(Err(err)) if err.is_canceled() => TerminalState::Cancelled,
            Exit::Returned(Err(err)) => TerminalState::Faulted(err),
            Exit::Panicked(message) => TerminalState::Faulted(TaskError::Panicked { message }),
            Exit::Dropped => TerminalState::Cancelled,
        }
    }
}
