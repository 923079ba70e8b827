//! Frontend HTTP server setup.
//!
//! # Responsibilities
//! - Create Axum Router for the SPA assets
//! - Serve `/static/*`, `/favicon.ico`, `/manifest.json` from the asset directory
//! - Fall back to `index.html` for client-side routes
//! - Report backend liveness on `/healthz`
//! - Wire up middleware (panic recovery, timeout, request ID, tracing)
//! - Serve until the shutdown signal, then drain in-flight requests

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, watch};
use tower_http::{
    catch_panic::CatchPanicLayer,
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::backend::BackendStatus;
use crate::config::LauncherConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, X_REQUEST_ID};
use crate::http::{health, spa};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub assets_dir: Arc<PathBuf>,
    pub backend: watch::Receiver<BackendStatus>,
    pub backend_port: u16,
}

/// HTTP server for the single-page app.
pub struct FrontendServer {
    router: Router,
    config: LauncherConfig,
}

impl FrontendServer {
    /// Create a new frontend server. `backend` feeds the health endpoint.
    pub fn new(config: LauncherConfig, backend: watch::Receiver<BackendStatus>) -> Self {
        let state = AppState {
            assets_dir: Arc::new(config.frontend.assets_dir.clone()),
            backend,
            backend_port: config.backend.port,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &LauncherConfig, state: AppState) -> Router {
        let assets = &config.frontend.assets_dir;

        let mut router = Router::new()
            .route("/healthz", get(health::healthz))
            .route_service("/favicon.ico", ServeFile::new(assets.join("favicon.ico")))
            .route_service("/manifest.json", ServeFile::new(assets.join("manifest.json")))
            .nest_service(
                "/static",
                ServeDir::new(assets).append_index_html_on_directories(false),
            )
            .fallback(spa::spa_fallback)
            .with_state(state);

        if config.security.enable_headers {
            router = router.layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ));
        }

        router
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
            .layer(CatchPanicLayer::new())
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain open requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            assets_dir = %self.config.frontend.assets_dir.display(),
            "Frontend server starting"
        );

        if !self.config.frontend.assets_dir.join("index.html").is_file() {
            tracing::warn!(
                assets_dir = %self.config.frontend.assets_dir.display(),
                "index.html not found, client routes will return 404"
            );
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Frontend server draining connections");
            })
            .await?;

        tracing::info!("Frontend server stopped");
        Ok(())
    }
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
