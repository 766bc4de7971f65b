//! Health probes
//!
//! `/health` and `/health/live` answer as long as the process is serving.
//! `/health/ready` also checks the database and answers 503 without it.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

impl HealthResponse {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: None,
        }
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("alive"))
}

/// Readiness probe
///
/// The database error itself is logged by [`db::health_check`] and not echoed.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match db::health_check(state.db()).await {
        Ok(()) => {
            let mut response = HealthResponse::new("ready");
            response.database = Some("healthy");
            (StatusCode::OK, Json(response))
        }
        Err(_) => {
            let mut response = HealthResponse::new("not_ready");
            response.database = Some("unhealthy");
            (StatusCode::SERVICE_UNAVAILABLE, Json(response))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
        assert!(response.database.is_none());
    }

    #[tokio::test]
    async fn test_liveness_check_returns_alive() {
        let response = liveness_check().await;
        assert_eq!(response.status, "alive");
    }
}
