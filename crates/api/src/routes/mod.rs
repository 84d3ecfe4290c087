pub mod health;
pub mod items;
pub mod points;

use axum::Router;

use crate::state::AppState;

/// Build the directory API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /items                 list item categories
///
/// /points                filtered list (?city=&uf=&items=)
/// /points/{id}           point detail
///
/// /signup                register a point (multipart, POST)
/// ```
///
/// `/health` and the static `/uploads` tree are mounted separately by
/// [`crate::router::build_app_router`].
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(items::router())
        .merge(points::router(max_upload_bytes))
}
