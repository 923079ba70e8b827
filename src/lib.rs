//! Single-page app launcher library.
//!
//! Starts a backend process, serves the pre-built frontend that talks to it,
//! and tears both down in order when the launcher is asked to stop.

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use backend::BackendManager;
pub use config::LauncherConfig;
pub use error::LauncherError;
pub use http::FrontendServer;
pub use lifecycle::{ExitReason, Shutdown};
