//! Liveness of the service and its book storage

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
    pub version: &'static str,
}

/// GET /health - 200 when storage answers a ping, 503 otherwise
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, storage) = match state.books().ping().await {
        Ok(()) => (StatusCode::OK, "ok", "reachable"),
        Err(err) => {
            tracing::warn!("Storage ping failed: {}", err);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
        }
    };

    let body = HealthResponse {
        status,
        storage,
        version: env!("CARGO_PKG_VERSION"),
    };
    (code, Json(body))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
