//! Backend process subsystem.
//!
//! # Data Flow
//! ```text
//! locator.rs (find backend/main.py or the bundled binary)
//!     → manager.rs (spawn with PORT/HOST, startup grace check)
//!     → supervisor task (owns the child, publishes status.rs)
//!     → stop request → kill → reap
//! ```

pub mod locator;
pub mod manager;
pub mod status;

pub use locator::{locate_backend, BackendLaunch};
pub use manager::{BackendError, BackendManager};
pub use status::BackendStatus;
