//! Liveness and readiness probes.

use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.storage().health_check().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, backend = state.storage().backend(), "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
