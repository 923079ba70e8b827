//! Backend process supervision.
//!
//! # Responsibilities
//! - Spawn the located backend with `PORT`/`HOST` injected
//! - Wait out the startup grace period and fail if the process died in it
//! - Publish process state on a watch channel
//! - Kill and reap the process on stop
//!
//! # Design Decisions
//! - A single supervisor task owns the `Child`; the manager talks to it
//!   through a oneshot stop request, so waiting and killing never race
//!   over a shared handle
//! - `kill_on_drop` so a dropped manager never leaks the process
//! - No restarts: an unexpected exit is reported, not repaired

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use thiserror::Error;
use tokio::process::{Child, Command};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::backend::locator::{candidate_paths, locate_backend, BackendLaunch};
use crate::backend::status::BackendStatus;
use crate::config::BackendConfig;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend not found, searched: {}", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("backend is already running")]
    AlreadyRunning,

    #[error("failed to start backend {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("backend process exited unexpectedly during startup ({})", display_code(.code))]
    ExitedDuringStartup { code: Option<i32> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Handle to the supervisor task of a spawned backend.
struct SupervisedProcess {
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

/// Starts, watches and stops the backend process.
pub struct BackendManager {
    config: BackendConfig,
    status_tx: Arc<watch::Sender<BackendStatus>>,
    status_rx: watch::Receiver<BackendStatus>,
    process: Option<SupervisedProcess>,
}

impl BackendManager {
    pub fn new(config: BackendConfig) -> Self {
        let (status_tx, status_rx) = watch::channel(BackendStatus::NotStarted);
        Self {
            config,
            status_tx: Arc::new(status_tx),
            status_rx,
            process: None,
        }
    }

    /// Current state snapshot.
    pub fn status(&self) -> BackendStatus {
        *self.status_rx.borrow()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<BackendStatus> {
        self.status_rx.clone()
    }

    /// Process-liveness health check.
    pub fn is_healthy(&self) -> bool {
        self.status().is_running()
    }

    /// Locate, spawn and wait out the startup grace period.
    pub async fn start(&mut self) -> Result<(), BackendError> {
        if self.process.is_some() && !self.status().is_terminal() {
            return Err(BackendError::AlreadyRunning);
        }
        self.reap().await;

        let launch = locate_backend(&self.config.root).ok_or_else(|| BackendError::NotFound {
            searched: candidate_paths(&self.config.root).into(),
        })?;

        let mut command = command_for(&launch, &self.config);
        tracing::info!(
            port = self.config.port,
            host = %self.config.host,
            backend = %launch,
            "Starting backend"
        );

        let child = command.spawn().map_err(|source| BackendError::Spawn {
            program: program_name(&launch, &self.config),
            source,
        })?;
        let pid = child.id();
        self.status_tx.send_replace(BackendStatus::Running { pid });

        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(supervise(child, stop_rx, Arc::clone(&self.status_tx)));
        self.process = Some(SupervisedProcess {
            stop_tx: Some(stop_tx),
            task,
        });

        let mut rx = self.status_rx.clone();
        let early_exit = tokio::time::timeout(
            self.config.startup_grace(),
            rx.wait_for(BackendStatus::is_terminal),
        )
        .await
        .map(|res| res.map(|status| *status));

        match early_exit {
            Err(_elapsed) => {
                tracing::info!(pid = ?pid, "Backend started successfully");
                Ok(())
            }
            Ok(Ok(status)) => {
                self.reap().await;
                let code = match status {
                    BackendStatus::Exited { code } => code,
                    _ => None,
                };
                Err(BackendError::ExitedDuringStartup { code })
            }
            Ok(Err(_closed)) => {
                self.reap().await;
                Err(BackendError::ExitedDuringStartup { code: None })
            }
        }
    }

    /// Kill the backend and wait for it to be reaped. Safe to call repeatedly.
    pub async fn stop(&mut self) {
        let Some(mut process) = self.process.take() else {
            return;
        };

        if !self.status().is_terminal() {
            tracing::info!("Stopping backend...");
        }
        if let Some(stop_tx) = process.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        match tokio::time::timeout(self.config.stop_timeout(), &mut process.task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "Backend supervisor task failed"),
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.config.stop_timeout_secs,
                    "Backend did not stop in time, abandoning supervisor"
                );
                // Dropping the child inside the aborted task kills it.
                process.task.abort();
            }
        }

        if !self.status().is_terminal() {
            self.status_tx.send_replace(BackendStatus::Stopped);
        }
    }

    /// Resolves once the backend exits on its own. Never resolves for a
    /// backend stopped through [`BackendManager::stop`].
    pub fn exited(&self) -> impl Future<Output = BackendStatus> + Send + 'static {
        let mut rx = self.status_rx.clone();
        async move {
            let exited = rx
                .wait_for(|status| matches!(status, BackendStatus::Exited { .. }))
                .await
                .map(|status| *status);
            match exited {
                Ok(status) => status,
                Err(_) => std::future::pending().await,
            }
        }
    }

    /// Join a supervisor whose process already ended.
    async fn reap(&mut self) {
        if let Some(process) = self.process.take() {
            let _ = process.task.await;
        }
    }
}

impl Drop for BackendManager {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.process.as_mut().and_then(|p| p.stop_tx.take()) {
            let _ = stop_tx.send(());
        }
    }
}

fn program_name(launch: &BackendLaunch, config: &BackendConfig) -> String {
    match launch {
        BackendLaunch::Script(_) => config.interpreter.clone(),
        BackendLaunch::Binary(path) => path.display().to_string(),
    }
}

/// Build the command for a located backend.
fn command_for(launch: &BackendLaunch, config: &BackendConfig) -> Command {
    let mut command = match launch {
        BackendLaunch::Script(script) => {
            let mut command = Command::new(&config.interpreter);
            command.arg(script);
            command
        }
        BackendLaunch::Binary(binary) => Command::new(binary),
    };

    command
        .env("PORT", config.port.to_string())
        .env("HOST", &config.host)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);
    command
}

async fn supervise(
    mut child: Child,
    stop_rx: oneshot::Receiver<()>,
    status_tx: Arc<watch::Sender<BackendStatus>>,
) {
    tokio::select! {
        biased;

        result = child.wait() => {
            let code = match result {
                Ok(status) => status.code(),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to wait on backend process");
                    None
                }
            };
            tracing::warn!(code = ?code, "Backend process exited");
            status_tx.send_replace(BackendStatus::Exited { code });
        }
        _ = stop_rx => {
            status_tx.send_replace(terminate(&mut child).await);
        }
    }
}

/// Kill `child` unless it has already exited, in which case its exit wins.
async fn terminate(child: &mut Child) -> BackendStatus {
    match child.try_wait() {
        Ok(Some(status)) => {
            tracing::warn!(code = ?status.code(), "Backend process exited before stop");
            return BackendStatus::Exited { code: status.code() };
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Failed to poll backend process"),
    }

    if let Err(e) = child.kill().await {
        tracing::warn!(error = %e, "Failed to kill backend process");
    }
    tracing::info!("Backend stopped");
    BackendStatus::Stopped
}
