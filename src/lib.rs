//! # perpetual
//!
//! **perpetual** supervises a fixed set of tasks that are expected to run forever.
//!
//! A run watches the [`TaskHandle`]s it is given. The first task that stops, for any reason,
//! ends the run: the remaining tasks are cancelled cooperatively, every one of them gets a single
//! chance to finish its cleanup, and the caller receives exactly one verdict.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  TaskHandle  │   │  TaskHandle  │   │  TaskHandle  │
//!     │  (task #1)   │   │  (task #2)   │   │  (task #3)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Supervisor::run(tasks, cancel)                                   │
//! │  - waiter   (first / all terminal, no polling)                    │
//! │  - tracker  (request_cancel once per handle, "did we win?")       │
//! │  - verdict  (terminal states → RunError)                          │
//! │  - cancellation path (grace wait, lost faults → Diagnostics)      │
//! └──────┬──────────────────────────────────────────────────┬─────────┘
//!        ▼                                                  ▼
//!   Err(RunError)                                      Diagnostics
//!   Fault | Multiple | Cancelled                  (faults that could not
//!                                                   be returned; LogWriter)
//! ```
//!
//! ### Lifecycle
//! ```text
//! wait for first terminal task  ──(cancel fired)──┐
//!   ├─► request_cancel() on every handle          │
//!   ├─► wait for all terminal   ──(cancel fired)──┤
//!   └─► aggregate:                                │
//!         ├─ one failure        ─► Fault          │
//!         ├─ several failures   ─► Multiple       ▼
//!         └─ external cancel ─────────────► cancel all, grace wait (once),
//!                                           report faults, Cancelled
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                        |
//! |-------------------|---------------------------------------------------------------|-------------------------------------------|
//! | **Tasks**         | Define perpetual tasks and spawn them as handles.             | [`Task`], [`TaskFn`], [`TaskHandle`]      |
//! | **Supervision**   | Run a fixed set of handles until the first deviation.         | [`Supervisor`], [`SupervisorBuilder`]     |
//! | **Errors**        | Typed task faults and run verdicts.                           | [`TaskError`], [`RunError`]               |
//! | **Diagnostics**   | Side channel for faults hidden by a cancellation.             | [`Diagnostics`], [`LogWriter`]            |
//! | **Configuration** | Run label and lost-fault reporting.                           | [`SupervisorConfig`]                      |
//!
//! ## Example
//! ```rust,no_run
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use perpetual::{RunError, Supervisor, SupervisorConfig, TaskError, TaskHandle, shutdown_token};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ticker = TaskHandle::spawn_fn("ticker", |ctx: CancellationToken| async move {
//!         loop {
//!             tokio::select! {
//!                 _ = ctx.cancelled() => return Err(TaskError::Canceled),
//!                 _ = tokio::time::sleep(Duration::from_millis(250)) => println!("tick"),
//!             }
//!         }
//!     });
//!
//!     let sup = Supervisor::new(SupervisorConfig::named("bot"));
//!     match sup.run(&[ticker], &shutdown_token()).await {
//!         Err(RunError::Cancelled) => Ok(()),
//!         Err(e) => Err(e.into()),
//!         Ok(never) => match never {},
//!     }
//! }
//! ```
mod config;
mod core;
mod diagnostics;
mod error;
mod tasks;

// ---- Public re-exports ----

pub use config::SupervisorConfig;
pub use crate::core::{Supervisor, SupervisorBuilder, shutdown_token, wait_for_shutdown_signal};
pub use diagnostics::{Diagnostics, LogWriter};
pub use error::{RunError, TaskError, TaskFailure};
pub use tasks::{Task, TaskFn, TaskHandle, TaskRef, TaskStatus, TerminalState};
