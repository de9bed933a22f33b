//! Runtime core: one supervisor run, from first completion to verdict.
//!
//! The public API from this module is [`Supervisor`] (plus its builder) and the
//! shutdown-signal helpers.
//!
//! Internal modules:
//! - [`waiter`]: suspends until the first / every handle is terminal;
//! - [`tracker`]: requests cancellation once per handle and records who won it;
//! - [`verdict`]: turns terminal states into the single [`RunError`](crate::RunError);
//! - [`supervisor`]: the run itself, including the caller-cancellation path;
//! - [`shutdown`]: cross-platform shutdown signal handling.

mod builder;
mod shutdown;
mod supervisor;
mod tracker;
mod verdict;
mod waiter;

pub use builder::SupervisorBuilder;
pub use shutdown::{shutdown_token, wait_for_shutdown_signal};
pub use supervisor::Supervisor;
