//! # Tracing-backed diagnostics sink.
//!
//! [`LogWriter`] is the default [`Diagnostics`] of a [`Supervisor`](crate::Supervisor).
//! It emits one `ERROR` record per lost fault:
//!
//! ```text
//! ERROR perpetual::diagnostics: run was cancelled, but task failed task="db" label="task_failed" error=error: broken pipe
//! ```

use crate::diagnostics::Diagnostics;
use crate::error::TaskError;

/// Logs lost faults with [`tracing::error!`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWriter;

impl Diagnostics for LogWriter {
    fn lost_fault(&self, task: &str, error: &TaskError) {
        tracing::error!(
            target: "perpetual::diagnostics",
            task,
            label = error.as_label(),
            error = %error.as_message(),
            "run was cancelled, but task failed"
        );
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
