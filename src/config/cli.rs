//! Command-line flags.
//!
//! Flags are layered on top of the optional config file: a flag that is
//! given always wins, a flag that is absent leaves the file (or default)
//! value in place.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::LauncherConfig;
use crate::config::validation::validate_config;

#[derive(Debug, Parser)]
#[command(name = "webui-launcher")]
#[command(about = "Serve a single-page app and supervise its backend process", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Port to serve the frontend on [default: 8080]
    #[arg(long)]
    pub port: Option<u16>,

    /// Port for the backend API [default: 11434]
    #[arg(long = "backend-port")]
    pub backend_port: Option<u16>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory containing the built frontend
    #[arg(long)]
    pub assets: Option<PathBuf>,
}

impl Cli {
    /// Resolve the effective configuration.
    pub fn into_config(self) -> Result<LauncherConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => LauncherConfig::default(),
        };

        if let Some(port) = self.port {
            config.frontend.port = port;
        }
        if let Some(port) = self.backend_port {
            config.backend.port = port;
        }
        if let Some(assets) = self.assets {
            config.frontend.assets_dir = assets;
        }
        if self.debug {
            config.observability.log_level = "debug".to_string();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
