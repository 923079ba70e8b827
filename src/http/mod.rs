//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → /static, /favicon.ico, /manifest.json → files from the asset directory
//!     → /healthz → health.rs
//!     → anything else → spa.rs (index.html, or 404 for reserved paths)
//! ```

pub mod health;
pub mod request;
pub mod server;
pub mod spa;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, FrontendServer};
