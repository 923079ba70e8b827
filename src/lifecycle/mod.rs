//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Start backend → Grace period → Bind frontend → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal or backend exit → Stop accepting → Drain connections
//!     → Stop backend → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//!     Second SIGTERM/SIGINT → Forced shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::{ShutdownSignal, SignalListener, SignalSource};
pub use startup::{run, run_with_signals, ExitReason};
