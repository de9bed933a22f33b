//! # Task abstraction.
//!
//! This module defines the [`Task`] trait (async, cancelable).
//! The common handle type is [`TaskRef`], an `Arc<dyn Task>` suitable for sharing across the runtime.
//!
//! A task receives a [`CancellationToken`] and must observe it to stop cooperatively.
//! Tasks supervised by this crate are *perpetual*: they are not supposed to return
//! unless asked to.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Shared reference to a task.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous, cancelable, perpetual unit of work.
///
/// A `Task` has a stable [`name`](Task::name) and an async [`run`](Task::run) method that receives a [`CancellationToken`].
///
/// ### Stopping
/// - When `ctx` fires, run bounded cleanup and return `Err(TaskError::Canceled)` (or `Ok(())`).
/// - Returning any other error after `ctx` fired reports a cleanup fault.
/// - Returning `Ok(())` without `ctx` having fired is a contract violation, reported as
///   [`TaskError::Returned`].
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use perpetual::{Task, TaskError};
///
/// struct Heartbeat;
///
/// #[async_trait]
/// impl Task for Heartbeat {
///     fn name(&self) -> &str { "heartbeat" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
///         ctx.cancelled().await;
///         Err(TaskError::Canceled)
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Runs the task until it fails or is cancelled.
    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError>;
}
