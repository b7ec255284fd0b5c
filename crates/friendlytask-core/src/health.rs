use axum::http::StatusCode;

/// `GET /healthz` — liveness probe.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` — readiness probe. The app is ready once it is serving;
/// database connectivity failures surface as 500s on real routes.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
