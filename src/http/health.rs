//! Launcher health endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::backend::BackendStatus;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub backend: BackendReport,
}

#[derive(Debug, Serialize)]
pub struct BackendReport {
    pub state: &'static str,
    pub pid: Option<u32>,
    pub healthy: bool,
    pub port: u16,
}

impl HealthReport {
    pub fn new(backend: BackendStatus, port: u16) -> Self {
        let healthy = backend.is_running();
        Self {
            status: if healthy { "ok" } else { "degraded" },
            backend: BackendReport {
                state: backend.label(),
                pid: backend.pid(),
                healthy,
                port,
            },
        }
    }
}

/// 200 while the backend process is alive, 503 otherwise.
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    let backend = *state.backend.borrow();
    let report = HealthReport::new(backend, state.backend_port);
    let code = if report.backend.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_backend_is_ok() {
        let report = HealthReport::new(BackendStatus::Running { pid: Some(7) }, 11434);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "status": "ok",
                "backend": { "state": "running", "pid": 7, "healthy": true, "port": 11434 }
            })
        );
    }

    #[test]
    fn exited_backend_is_degraded() {
        let report = HealthReport::new(BackendStatus::Exited { code: Some(1) }, 11434);
        assert_eq!(report.status, "degraded");
        assert_eq!(report.backend.state, "exited");
        assert!(!report.backend.healthy);
        assert_eq!(report.backend.pid, None);
    }
}
