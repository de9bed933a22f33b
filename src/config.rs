//! # Supervisor configuration.
//!
//! Provides [`SupervisorConfig`], the settings a [`Supervisor`](crate::Supervisor) is built with.
//!
//! The supervisor has no timers, retries or limits of its own: deadlines are composed by the
//! caller through the run's cancellation token. What remains configurable is how a run shows
//! up in logs.

use std::borrow::Cow;

/// Configuration for a [`Supervisor`](crate::Supervisor).
///
/// ## Field semantics
/// - `name`: label recorded on the tracing span of every run (`supervisor.run{name=..}`)
#[derive(Clone, Debug)]
pub struct SupervisorConfig {
    /// Label attached to the run's tracing span.
    pub name: Cow<'static, str>,
}

impl SupervisorConfig {
    /// Creates a config with the given run label.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for SupervisorConfig {
    /// Default configuration: `name = "supervisor"`.
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("supervisor"),
        }
    }
}
