//! Error types produced by supervised tasks and by supervisor runs.
//!
//! This module defines the error vocabulary of the crate:
//!
//! - [`TaskError`]: faults raised by (or synthesized for) individual tasks.
//! - [`TaskFailure`]: a [`TaskError`] tagged with the name of the task that produced it.
//! - [`RunError`]: the single verdict of a [`Supervisor::run`](crate::Supervisor::run).
//!
//! Both enums provide helper methods (`as_label`, `as_message`) for logs/metrics.

use std::fmt;

use thiserror::Error;

/// # Errors produced by task execution.
///
/// A perpetual task never succeeds, so every way it can stop maps to one of these
/// variants. [`TaskError::Returned`] is never produced by a task itself: the runtime
/// synthesizes it when a task returns without being asked to stop.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task work failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task panicked; the panic payload was captured.
    #[error("task panicked: {message}")]
    Panicked {
        /// Panic message (or `"unknown panic"` for non-string payloads).
        message: String,
    },

    /// Task returned normally although it is declared perpetual.
    #[error("task {task:?} completed despite being declared perpetual")]
    Returned {
        /// Name of the offending task.
        task: String,
    },

    /// Task observed its cancellation token and stopped.
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Builds a [`TaskError::Fail`] from anything printable.
    ///
    /// # Example
    /// ```
    /// use perpetual::TaskError;
    ///
    /// let err = TaskError::fail("connection reset");
    /// assert_eq!(err.to_string(), "execution failed: connection reset");
    /// ```
    pub fn fail(error: impl fmt::Display) -> Self {
        TaskError::Fail {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use perpetual::TaskError;
    ///
    /// let err = TaskError::Returned { task: "ticker".into() };
    /// assert_eq!(err.as_label(), "task_returned");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Panicked { .. } => "task_panicked",
            TaskError::Returned { .. } => "task_returned",
            TaskError::Canceled => "task_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Panicked { message } => format!("panic: {message}"),
            TaskError::Returned { task } => format!("returned: {task}"),
            TaskError::Canceled => "context cancelled".to_string(),
        }
    }

    /// Indicates whether this is the cooperative-cancellation marker.
    pub fn is_canceled(&self) -> bool {
        matches!(self, TaskError::Canceled)
    }
}

/// A task fault tagged with the identity of the task that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("task {task:?}: {error}")]
pub struct TaskFailure {
    /// Name of the task.
    pub task: String,
    /// The fault itself.
    #[source]
    pub error: TaskError,
}

impl TaskFailure {
    /// Creates a new tagged failure.
    pub fn new(task: impl Into<String>, error: TaskError) -> Self {
        Self {
            task: task.into(),
            error,
        }
    }
}

/// # Verdict of a supervisor run.
///
/// A run over perpetual tasks cannot succeed, so it always ends with exactly one of
/// these. The three outcomes callers usually care about are structurally distinct:
///
/// - [`RunError::Fault`]: one task failed;
/// - [`RunError::Multiple`]: several tasks failed concurrently (input order preserved);
/// - [`RunError::Cancelled`]: the run (or one of its tasks) was stopped from outside.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// Exactly one task deviated from "runs forever".
    #[error(transparent)]
    Fault(TaskFailure),

    /// Several tasks failed before the run could finish tearing down.
    #[error("{} tasks failed: {}", .0.len(), join_failures(.0))]
    Multiple(Vec<TaskFailure>),

    /// The run was cancelled, either by its caller or by an external cancellation of a task.
    #[error("run cancelled")]
    Cancelled,

    /// The run was started with an empty task set.
    #[error("no tasks to supervise")]
    NoTasks,
}

impl RunError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use perpetual::RunError;
    ///
    /// assert_eq!(RunError::Cancelled.as_label(), "run_cancelled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RunError::Fault(_) => "run_fault",
            RunError::Multiple(_) => "run_multiple_faults",
            RunError::Cancelled => "run_cancelled",
            RunError::NoTasks => "run_no_tasks",
        }
    }

    /// True when the verdict is a cancellation rather than a fault.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunError::Cancelled)
    }

    /// Returns every task failure carried by this verdict (empty for cancellation).
    pub fn failures(&self) -> &[TaskFailure] {
        match self {
            RunError::Fault(f) => std::slice::from_ref(f),
            RunError::Multiple(fs) => fs,
            RunError::Cancelled | RunError::NoTasks => &[],
        }
    }
}

fn join_failures(failures: &[TaskFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returned_names_task() {
        let err = TaskError::Returned {
            task: "ticker".into(),
        };
        assert_eq!(
            err.to_string(),
            "task \"ticker\" completed despite being declared perpetual"
        );
    }

    #[test]
    fn test_single_fault_is_transparent() {
        let f = TaskFailure::new("db", TaskError::fail("boom"));
        let verdict = RunError::Fault(f.clone());
        assert_eq!(verdict.to_string(), f.to_string());
        assert_eq!(verdict.failures(), &[f]);
    }

    #[test]
    fn test_multiple_lists_all() {
        let verdict = RunError::Multiple(vec![
            TaskFailure::new("a", TaskError::fail("x")),
            TaskFailure::new("b", TaskError::fail("y")),
        ]);
        assert_eq!(
            verdict.to_string(),
            "2 tasks failed: task \"a\": execution failed: x; task \"b\": execution failed: y"
        );
        assert_eq!(verdict.failures().len(), 2);
        assert!(!verdict.is_cancelled());
    }

    #[test]
    fn test_message_carries_details() {
        assert_eq!(TaskError::fail("disk full").as_message(), "error: disk full");
        assert_eq!(TaskError::Canceled.as_message(), "context cancelled");
        assert!(TaskError::Canceled.is_canceled());
        assert!(!TaskError::fail("x").is_canceled());
    }

    #[test]
    fn test_cancelled_has_no_failures() {
        assert!(RunError::Cancelled.failures().is_empty());
        assert!(RunError::Cancelled.is_cancelled());
    }
}
