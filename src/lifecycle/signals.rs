//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for SIGINT and SIGTERM (Ctrl-C elsewhere)
//! - Report which signal arrived
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Handlers are registered once, up front, so a signal arriving during
//!   backend startup is queued rather than killing the launcher outright
//! - The first signal starts a graceful shutdown; the launcher listens
//!   again during the drain and a second one forces it

use std::fmt;
use std::future::Future;

use tokio::sync::mpsc;

/// A signal that asks the launcher to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => f.write_str("SIGINT"),
            ShutdownSignal::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Anything the launcher can wait on for stop requests.
pub trait SignalSource: Send {
    fn recv(&mut self) -> impl Future<Output = ShutdownSignal> + Send;
}

/// Process signal listener.
pub struct SignalListener {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl SignalListener {
    /// Install the handlers. Must be called from within a Tokio runtime.
    #[cfg(unix)]
    pub fn new() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {})
    }
}

impl SignalSource for SignalListener {
    #[cfg(unix)]
    async fn recv(&mut self) -> ShutdownSignal {
        tokio::select! {
            _ = self.interrupt.recv() => ShutdownSignal::Interrupt,
            _ = self.terminate.recv() => ShutdownSignal::Terminate,
        }
    }

    #[cfg(not(unix))]
    async fn recv(&mut self) -> ShutdownSignal {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        ShutdownSignal::Interrupt
    }
}

/// Channel-fed signals, for embedding the launcher or driving it in tests.
/// A closed channel never yields a signal.
impl SignalSource for mpsc::Receiver<ShutdownSignal> {
    async fn recv(&mut self) -> ShutdownSignal {
        match mpsc::Receiver::recv(self).await {
            Some(signal) => signal,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn channel_source_delivers_in_order() {
        let (tx, mut rx) = mpsc::channel(4);
        tx.send(ShutdownSignal::Terminate).await.unwrap();
        tx.send(ShutdownSignal::Interrupt).await.unwrap();

        assert_eq!(SignalSource::recv(&mut rx).await, ShutdownSignal::Terminate);
        assert_eq!(SignalSource::recv(&mut rx).await, ShutdownSignal::Interrupt);
    }

    #[tokio::test]
    async fn closed_channel_never_fires() {
        let (tx, mut rx) = mpsc::channel::<ShutdownSignal>(1);
        drop(tx);

        let waited = tokio::time::timeout(Duration::from_millis(50), SignalSource::recv(&mut rx)).await;
        assert!(waited.is_err());
    }

    #[test]
    fn signal_names() {
        assert_eq!(ShutdownSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownSignal::Terminate.to_string(), "SIGTERM");
    }
}
