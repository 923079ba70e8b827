//! Startup and shutdown orchestration.
//!
//! # Responsibilities
//! - Start the backend before anything listens
//! - Bind the frontend and serve in a background task
//! - Wait for a signal, a backend exit or a server failure
//! - Drain the frontend, then stop the backend
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Ordered shutdown: frontend first so no request is served against a
//!   dead backend, then the backend
//! - Drain has a deadline; a second signal cuts it short
//! - The backend is stopped on every exit path once it has been started

use std::process::ExitCode;

use tokio::net::TcpListener;

use crate::backend::{BackendManager, BackendStatus};
use crate::config::LauncherConfig;
use crate::error::LauncherError;
use crate::http::FrontendServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::{ShutdownSignal, SignalListener, SignalSource};

/// Why the launcher stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Operator asked for it.
    Signal(ShutdownSignal),
    /// The backend died on its own; there is no restart.
    BackendExited { code: Option<i32> },
}

impl ExitReason {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ExitReason::Signal(_) => ExitCode::SUCCESS,
            ExitReason::BackendExited { .. } => ExitCode::FAILURE,
        }
    }
}

/// Run the launcher against process signals.
pub async fn run(config: LauncherConfig) -> Result<ExitReason, LauncherError> {
    let signals = SignalListener::new().map_err(LauncherError::Signal)?;
    run_with_signals(config, signals).await
}

/// Run the launcher, taking stop requests from `signals`.
pub async fn run_with_signals<S: SignalSource>(
    config: LauncherConfig,
    mut signals: S,
) -> Result<ExitReason, LauncherError> {
    let mut backend = BackendManager::new(config.backend.clone());
    backend.start().await?;

    let address = config.frontend.bind_address();
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(source) => {
            backend.stop().await;
            return Err(LauncherError::Bind { address, source });
        }
    };

    let shutdown = Shutdown::new();
    let server = FrontendServer::new(config.clone(), backend.subscribe());
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let outcome = tokio::select! {
        signal = signals.recv() => {
            tracing::info!(signal = %signal, "Shutting down...");
            Ok(ExitReason::Signal(signal))
        }
        status = backend.exited() => {
            let code = match status {
                BackendStatus::Exited { code } => code,
                _ => None,
            };
            tracing::error!(code = ?code, "Backend exited unexpectedly, shutting down");
            Ok(ExitReason::BackendExited { code })
        }
        result = &mut server_task => {
            let err = match result {
                Ok(Ok(())) => std::io::Error::other("server stopped without a shutdown request"),
                Ok(Err(e)) => e,
                Err(join) => std::io::Error::other(join),
            };
            tracing::error!(error = %err, "Frontend server failed");
            Err(LauncherError::Serve(err))
        }
    };

    if outcome.is_ok() {
        shutdown.trigger();
        let grace = config.shutdown.grace();
        tokio::select! {
            drained = tokio::time::timeout(grace, &mut server_task) => match drained {
                Ok(Ok(Ok(()))) => {}
                Ok(Ok(Err(e))) => tracing::error!(error = %e, "Error during frontend server shutdown"),
                Ok(Err(e)) => tracing::error!(error = %e, "Frontend server task failed"),
                Err(_) => {
                    tracing::warn!(grace_secs = config.shutdown.grace_secs, "Drain deadline passed, closing open connections");
                    server_task.abort();
                }
            },
            signal = signals.recv() => {
                tracing::warn!(signal = %signal, "Second signal received, forcing shutdown");
                server_task.abort();
            }
        }
    }

    backend.stop().await;
    tracing::info!("Shutdown complete");
    outcome
}
