//! # Example: eternal
//!
//! Runs two perpetual tasks under one supervisor until either of them breaks or the process
//! receives Ctrl-C / SIGTERM.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► spawn "heartbeat" (ticks forever, flushes on cancel)
//!   ├─► spawn "watchdog"  (fails after FAIL_AFTER ticks, if set)
//!   └─► Supervisor::run(&[heartbeat, watchdog], shutdown_token())
//!         ├─ watchdog fails → heartbeat cancelled → Err(Fault)
//!         └─ Ctrl-C         → both cancelled      → Err(Cancelled)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example eternal
//! FAIL_AFTER=5 cargo run --example eternal
//! ```

use std::time::Duration;

use perpetual::{
    RunError, Supervisor, SupervisorConfig, TaskError, TaskHandle, shutdown_token,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let fail_after: Option<u32> = std::env::var("FAIL_AFTER").ok().and_then(|v| v.parse().ok());

    let heartbeat = TaskHandle::spawn_fn("heartbeat", |ctx: CancellationToken| async move {
        let mut beats = 0u64;
        loop {
            tokio::select! {
                _ = ctx.cancelled() => {
                    tracing::info!(beats, "heartbeat flushing before exit");
                    return Err(TaskError::Canceled);
                }
                _ = tokio::time::sleep(Duration::from_millis(500)) => {
                    beats += 1;
                    tracing::info!(beats, "beat");
                }
            }
        }
    });

    let watchdog = TaskHandle::spawn_fn("watchdog", move |ctx: CancellationToken| async move {
        let mut ticks = 0u32;
        loop {
            tokio::select! {
                _ = ctx.cancelled() => return Err(TaskError::Canceled),
                _ = tokio::time::sleep(Duration::from_secs(1)) => {
                    ticks += 1;
                    if fail_after.is_some_and(|n| ticks >= n) {
                        return Err(TaskError::fail(format!("no response after {ticks} ticks")));
                    }
                }
            }
        }
    });

    let sup = Supervisor::new(SupervisorConfig::named("eternal"));
    match sup.run(&[heartbeat, watchdog], &shutdown_token()).await {
        Err(RunError::Cancelled) => {
            tracing::info!("stopped by signal");
            Ok(())
        }
        Err(err) => {
            for failure in err.failures() {
                tracing::error!(task = %failure.task, error = %failure.error, "task failed");
            }
            Err(err.into())
        }
        Ok(never) => match never {},
    }
}
