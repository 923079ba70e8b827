//! Top-level launcher errors.

use thiserror::Error;

use crate::backend::BackendError;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum LauncherError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("failed to bind frontend on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("frontend server failed: {0}")]
    Serve(#[source] std::io::Error),

    #[error("failed to install signal handlers: {0}")]
    Signal(#[source] std::io::Error),
}
