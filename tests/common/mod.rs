//! Shared helpers for scenario tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use perpetual::{Diagnostics, Supervisor, SupervisorConfig, TaskError, TaskHandle};
use tokio_util::sync::CancellationToken;

/// Level-triggered one-shot flag.
#[derive(Clone, Default)]
pub struct Flag(CancellationToken);

impl Flag {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set(&self) {
        self.0.cancel();
    }
    pub fn is_set(&self) -> bool {
        self.0.is_cancelled()
    }
    pub async fn wait(&self) {
        self.0.cancelled().await
    }
}

/// What a scripted task does when its work is interrupted or finished.
#[derive(Clone, Default)]
pub enum Cleanup {
    #[default]
    Nothing,
    Set(Flag),
    Fail(&'static str),
    /// Sets the flag only after `release` is set, ignoring cancellation meanwhile.
    SlowSet { release: Flag, done: Flag },
}

/// Scripted task: `set` → wait for `wait` (or cancellation) → fail with `fail` → cleanup.
///
/// With no `fail`, a task whose `wait` completes returns normally.
#[derive(Clone, Default)]
pub struct Script {
    pub set: Option<Flag>,
    pub wait: Option<Flag>,
    pub fail: Option<&'static str>,
    pub cleanup: Cleanup,
}

pub fn scripted(name: &'static str, script: Script) -> TaskHandle {
    TaskHandle::spawn_fn(name, move |ctx: CancellationToken| {
        let s = script.clone();
        async move {
            if let Some(f) = &s.set {
                f.set();
            }
            let mut outcome = match &s.wait {
                Some(w) => tokio::select! {
                    biased;
                    _ = w.wait() => Ok(()),
                    _ = ctx.cancelled() => Err(TaskError::Canceled),
                },
                None => Ok(()),
            };
            if outcome.is_ok() {
                if let Some(msg) = s.fail {
                    outcome = Err(TaskError::fail(msg));
                }
            }
            match s.cleanup {
                Cleanup::Nothing => outcome,
                Cleanup::Set(f) => {
                    f.set();
                    outcome
                }
                Cleanup::Fail(msg) => Err(TaskError::fail(msg)),
                Cleanup::SlowSet { release, done } => {
                    release.wait().await;
                    done.set();
                    outcome
                }
            }
        }
    })
}

/// Diagnostics sink that remembers every lost fault.
#[derive(Default)]
pub struct Recorder(Mutex<Vec<(String, TaskError)>>);

impl Recorder {
    pub fn faults(&self) -> Vec<(String, TaskError)> {
        self.0.lock().unwrap().clone()
    }
}

impl Diagnostics for Recorder {
    fn lost_fault(&self, task: &str, error: &TaskError) {
        self.0.lock().unwrap().push((task.to_string(), error.clone()));
    }
}

pub fn supervisor() -> (Supervisor, Arc<Recorder>) {
    let rec = Arc::new(Recorder::default());
    let sup = Supervisor::builder(SupervisorConfig::named("test"))
        .with_diagnostics(rec.clone())
        .build();
    (sup, rec)
}

/// Sets `cancel` once every flag in `wait` is set.
pub fn cancel_after(wait: Vec<Flag>, cancel: impl FnOnce() + Send + 'static) {
    tokio::spawn(async move {
        for f in &wait {
            f.wait().await;
        }
        cancel();
    });
}
