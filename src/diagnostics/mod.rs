//! # Diagnostics side channel.
//!
//! A run that ends in cancellation has only one return channel, and it carries the
//! cancellation. Task faults observed on that path are handed to a [`Diagnostics`] sink
//! instead of being dropped.
//!
//! ```text
//! Supervisor::run ── cancellation path ──► LostFaults guard (on drop)
//!                                               │
//!                                               └──► Diagnostics::lost_fault(task, error)
//!                                                         │
//!                                                    ┌────┴─────┬─────────┐
//!                                                    ▼          ▼         ▼
//!                                                LogWriter   Metrics   Custom
//! ```

mod log;
mod sink;

pub use log::LogWriter;
pub use sink::Diagnostics;
