use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the directory can both serve and register points.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether the photo storage directory exists.
    pub uploads_ready: bool,
}

/// GET /health
///
/// Registration needs both the database and the photo directory; losing
/// either one reports `degraded`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = ecoleta_db::health_check(&state.pool).await.is_ok();
    let uploads_ready = state.uploads.is_ready().await;

    if !uploads_ready {
        tracing::warn!(dir = %state.uploads.dir().display(), "Uploads directory missing");
    }

    let status = if db_healthy && uploads_ready {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        uploads_ready,
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
