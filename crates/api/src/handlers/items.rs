//! Handlers for item categories.

use axum::extract::State;
use axum::Json;
use ecoleta_db::models::item::ItemView;
use ecoleta_db::repositories::ItemRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /items
///
/// List every item category with its public image URL.
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<ItemView>>> {
    let items = ItemRepo::list_all(&state.pool)
        .await?
        .into_iter()
        .map(|item| item.into_view(state.uploads_url()))
        .collect();

    Ok(Json(items))
}
