//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags (cli.rs)
//!     → optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → flag overrides applied
//!     → validation.rs (semantic checks)
//!     → LauncherConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::{load_config, ConfigError};
pub use schema::{
    BackendConfig, FrontendConfig, LauncherConfig, ObservabilityConfig, SecurityConfig,
    ShutdownConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
