//! webui-launcher
//!
//! Serves a pre-built single-page app and supervises the backend it talks to.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser ──▶ frontend server (axum) ──▶ assets/frontend/ (index.html, static files)
//!                     │
//!                     │ /healthz reads backend status
//!                     ▼
//!              backend manager ──spawn──▶ python3 backend/main.py
//!                     ▲                   or assets/backend/backend
//!                     │                   (PORT, HOST injected)
//!   SIGINT/SIGTERM ──▶ lifecycle: drain frontend → stop backend → exit
//! ```

use std::process::ExitCode;

use clap::Parser;

use webui_launcher::config::Cli;
use webui_launcher::lifecycle;
use webui_launcher::observability::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("webui-launcher: {e}");
            return ExitCode::from(2);
        }
    };

    init_logging(&config.observability.log_level);

    tracing::info!("webui-launcher v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        port = config.frontend.port,
        backend_port = config.backend.port,
        assets_dir = %config.frontend.assets_dir.display(),
        "Configuration loaded"
    );

    match lifecycle::run(config).await {
        Ok(reason) => {
            tracing::info!(reason = ?reason, "Launcher exiting");
            reason.exit_code()
        }
        Err(e) => {
            tracing::error!(error = %e, "Launcher failed");
            ExitCode::FAILURE
        }
    }
}
