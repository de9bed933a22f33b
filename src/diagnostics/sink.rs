//! # Diagnostics trait
//!
//! `Diagnostics` is the extension point for observing faults the supervisor cannot
//! return to its caller.
//!
//! ## Contract
//! - Calls are synchronous: they may happen from a drop guard, where nothing can be awaited.
//! - Implementations must not block for long; hand heavy work off to a channel.
//!
//! ## Example
//! ```rust
//! use std::sync::Mutex;
//! use perpetual::{Diagnostics, TaskError};
//!
//! #[derive(Default)]
//! struct Collect(Mutex<Vec<String>>);
//!
//! impl Diagnostics for Collect {
//!     fn lost_fault(&self, task: &str, error: &TaskError) {
//!         if let Ok(mut v) = self.0.lock() {
//!             v.push(format!("{task}: {error}"));
//!         }
//!     }
//!     fn name(&self) -> &'static str { "collect" }
//! }
//! ```

use crate::error::TaskError;

/// Sink for `(task, fault)` pairs that occur while a run is propagating a cancellation.
pub trait Diagnostics: Send + Sync + 'static {
    /// Reports a fault of `task` that cannot be surfaced through the run's result.
    fn lost_fault(&self, task: &str, error: &TaskError);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
