//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → TraceLayer spans per HTTP request (x-request-id attached)
//!
//! Consumers:
//!     → stdout via tracing-subscriber's fmt layer
//! ```

pub mod logging;

pub use logging::init_logging;
