//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports non-zero, timeouts > 0)
//! - Detect the frontend and backend competing for one port
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LauncherConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::IpAddr;

use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

use crate::config::schema::LauncherConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be 0")]
    ZeroPort { field: &'static str },

    #[error("frontend and backend both use port {port}")]
    PortConflict { port: u16 },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is not an IP address: {value}")]
    InvalidHost { field: &'static str, value: String },

    #[error("{field} must be greater than 0")]
    ZeroDuration { field: &'static str },

    #[error("observability.log_level is not a log level: {value}")]
    InvalidLogLevel { value: String },
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &LauncherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.frontend.port == 0 {
        errors.push(ValidationError::ZeroPort { field: "frontend.port" });
    }
    if config.backend.port == 0 {
        errors.push(ValidationError::ZeroPort { field: "backend.port" });
    }

    let frontend_host = check_host("frontend.host", &config.frontend.host, &mut errors);
    let backend_host = check_host("backend.host", &config.backend.host, &mut errors);

    if config.frontend.port != 0 && config.frontend.port == config.backend.port {
        let overlaps = match (frontend_host, backend_host) {
            (Some(f), Some(b)) => f == b || f.is_unspecified() || b.is_unspecified(),
            _ => false,
        };
        if overlaps {
            errors.push(ValidationError::PortConflict {
                port: config.frontend.port,
            });
        }
    }

    if config.backend.interpreter.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "backend.interpreter" });
    }
    if config.frontend.assets_dir.as_os_str().is_empty() {
        errors.push(ValidationError::Empty { field: "frontend.assets_dir" });
    }
    if config.backend.stop_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration { field: "backend.stop_timeout_secs" });
    }
    if config.shutdown.grace_secs == 0 {
        errors.push(ValidationError::ZeroDuration { field: "shutdown.grace_secs" });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroDuration { field: "timeouts.request_secs" });
    }
    if config.observability.log_level.parse::<LevelFilter>().is_err() {
        errors.push(ValidationError::InvalidLogLevel {
            value: config.observability.log_level.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_host(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) -> Option<IpAddr> {
    if value.trim().is_empty() {
        errors.push(ValidationError::Empty { field });
        return None;
    }
    match value.parse::<IpAddr>() {
        Ok(ip) => Some(ip),
        Err(_) => {
            errors.push(ValidationError::InvalidHost {
                field,
                value: value.to_string(),
            });
            None
        }
    }
}
