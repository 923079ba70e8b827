//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the launcher.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the launcher.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Frontend HTTP server (bind address, asset directory).
    pub frontend: FrontendConfig,

    /// Supervised backend process.
    pub backend: BackendConfig,

    /// Shutdown sequencing.
    pub shutdown: ShutdownConfig,

    /// Timeout configuration for the frontend server.
    pub timeouts: TimeoutConfig,

    /// Response hardening.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Frontend server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FrontendConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Port the SPA is served on.
    pub port: u16,

    /// Directory holding the pre-built SPA (index.html, static/, favicon.ico).
    pub assets_dir: PathBuf,
}

impl FrontendConfig {
    /// Socket address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            assets_dir: PathBuf::from("assets/frontend"),
        }
    }
}

/// Backend process configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    /// Port handed to the backend through the `PORT` variable.
    pub port: u16,

    /// Host handed to the backend through the `HOST` variable.
    pub host: String,

    /// Interpreter used for script backends (`backend/main.py`).
    pub interpreter: String,

    /// Directory the backend is searched under.
    pub root: PathBuf,

    /// How long the backend must stay alive after spawn to count as started.
    pub startup_grace_ms: u64,

    /// Upper bound on waiting for the killed backend to be reaped.
    pub stop_timeout_secs: u64,
}

impl BackendConfig {
    pub fn startup_grace(&self) -> Duration {
        Duration::from_millis(self.startup_grace_ms)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_secs(self.stop_timeout_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            port: 11434,
            host: "127.0.0.1".to_string(),
            interpreter: "python3".to_string(),
            root: PathBuf::from("."),
            startup_grace_ms: 2000,
            stop_timeout_secs: 5,
        }
    }
}

/// Shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Deadline for draining in-flight frontend requests, in seconds.
    pub grace_secs: u64,
}

impl ShutdownConfig {
    pub fn grace(&self) -> Duration {
        Duration::from_secs(self.grace_secs)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { grace_secs: 10 }
    }
}

/// Timeout configuration for the frontend server.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time to produce a response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SecurityConfig {
    /// Add `x-content-type-options: nosniff` to every response.
    pub enable_headers: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
