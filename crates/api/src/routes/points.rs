//! Route definitions for collection points.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::points;
use crate::state::AppState;

/// ```text
/// GET    /points             -> list_points
/// GET    /points/{id}        -> get_point
/// POST   /signup             -> create_point (body limited to `max_upload_bytes`)
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/points", get(points::list_points))
        .route("/points/{id}", get(points::get_point))
        .route(
            "/signup",
            post(points::create_point).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
