use axum::{Json, http::StatusCode};
use serde::Serialize;

/// Health-check response: liveness plus the service identity, so a probe
/// can tell which gateway build answered.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// `GET /health`
///
/// Returns a basic JSON document indicating liveness. The pipeline itself
/// is not probed here: data routes re-run it per request, so a registry
/// outage surfaces on those routes rather than flapping the health check.
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_service_identity() {
        let (status, Json(body)) = health().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert_eq!(body.service, "api-gateway");
        assert!(!body.version.is_empty());
    }
}
