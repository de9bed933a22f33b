//! # Task abstractions and handles.
//!
//! This module provides the task-related types:
//! - [`Task`] - trait for implementing async cancelable tasks
//! - [`TaskFn`] - function-based task implementation
//! - [`TaskRef`] - shared reference to a task (`Arc<dyn Task>`)
//! - [`TaskHandle`] - handle to a spawned task (status, cancel, await)
//! - [`TaskStatus`] / [`TerminalState`] - what a handle reports

mod handle;
mod state;
mod task;
mod task_fn;

pub use handle::TaskHandle;
pub use state::{TaskStatus, TerminalState};
pub use task::{Task, TaskRef};
pub use task_fn::TaskFn;
