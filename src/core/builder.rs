use std::sync::Arc;

use crate::config::SupervisorConfig;
use crate::diagnostics::{Diagnostics, LogWriter};

use super::supervisor::Supervisor;

/// Builder for constructing a [`Supervisor`] with a custom diagnostics sink.
pub struct SupervisorBuilder {
    cfg: SupervisorConfig,
    diagnostics: Arc<dyn Diagnostics>,
}

impl SupervisorBuilder {
    /// Creates a new builder with the given configuration.
    ///
    /// Lost faults go to [`LogWriter`] unless [`with_diagnostics`](Self::with_diagnostics) is used.
    pub fn new(cfg: SupervisorConfig) -> Self {
        Self {
            cfg,
            diagnostics: Arc::new(LogWriter),
        }
    }

    /// Sets the sink for faults that occur while a run is propagating a cancellation.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Builds the supervisor.
    pub fn build(self) -> Supervisor {
        Supervisor::new_internal(self.cfg, self.diagnostics)
    }
}
