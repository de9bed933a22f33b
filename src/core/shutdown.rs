//! # Process shutdown as a run's cancellation source.
//!
//! A perpetual run ends only when a task stops or when its cancellation token fires. For a
//! long-lived service that token usually comes from the operator: [`shutdown_token`] is cancelled
//! by the first termination signal, so Ctrl-C or `kill` tears the run down through the regular
//! grace wait and every lost fault is still reported.
//!
//! ```text
//! SIGINT / SIGTERM / SIGQUIT ──► wait_for_shutdown_signal ──► token.cancel() ──► run: Cancelled
//! ```
//!
//! Non-Unix platforms listen for Ctrl-C only.

use tokio_util::sync::CancellationToken;

/// Returns a token that is cancelled on the first termination signal.
///
/// The listener runs on a background task. If signal registration fails the token is
/// cancelled immediately (and the failure logged), so a run never outlives a process
/// that cannot be stopped.
///
/// # Panics
/// Panics if called outside of a Tokio runtime.
pub fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = trigger.cancelled() => return,
            res = wait_for_shutdown_signal() => {
                match res {
                    Ok(()) => tracing::info!("shutdown signal received"),
                    Err(error) => tracing::error!(%error, "failed to register signal handlers"),
                }
            }
        }
        trigger.cancel();
    });
    token
}

/// Resolves on `SIGINT`, `SIGTERM` or `SIGQUIT`; `Err` if a listener cannot be registered.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = sigint.recv()  => {},
        _ = sigterm.recv() => {},
        _ = sigquit.recv() => {},
    }
    Ok(())
}

/// Resolves on Ctrl-C; `Err` if the listener cannot be registered.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
