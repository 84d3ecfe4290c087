//! Handlers for collection points: filtered listing, detail and
//! registration.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use ecoleta_core::error::CoreError;
use ecoleta_core::items::join_item_ids;
use ecoleta_core::media::validate_image_upload;
use ecoleta_core::types::DbId;
use ecoleta_db::models::point::{CreatedPoint, PointDetail, PointListParams, PointView};
use ecoleta_db::repositories::{ItemRepo, PointRepo};

use crate::error::{AppError, AppResult};
use crate::response::PointResponse;
use crate::signup::SignupForm;
use crate::state::AppState;

/// GET /points?city=&uf=&items=
///
/// Distinct points in the given city and state that accept at least one of
/// the listed items. Incomplete or unparsable filters match nothing, and a
/// malformed query string is treated as an empty one.
pub async fn list_points(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<Vec<PointView>>> {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable point query, returning no points");
            Vec::new()
        }
    };

    let Some(filter) = PointListParams::from_pairs(pairs).into_filter() else {
        tracing::debug!("Point filter incomplete, returning no points");
        return Ok(Json(Vec::new()));
    };

    let points = PointRepo::list_filtered(&state.pool, &filter)
        .await?
        .into_iter()
        .map(|point| point.into_view(state.uploads_url()))
        .collect();

    Ok(Json(points))
}

/// GET /points/{id}
///
/// A single point with its image URL and the titles of the items it
/// accepts. A missing point, including an id that is not a number, is
/// reported as `400 Point not found.`.
pub async fn get_point(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<PointResponse<PointDetail>>> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Point",
            id: raw_id.clone(),
        })
    };

    let id: DbId = raw_id.trim().parse().map_err(|_| not_found())?;
    let point = PointRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let items = ItemRepo::titles_for_point(&state.pool, id).await?;

    Ok(Json(PointResponse {
        point: point.into_detail(state.uploads_url(), items),
    }))
}

/// POST /signup (multipart/form-data)
///
/// Register a point: validate the form, store the photo, then insert the
/// point and its item associations in one transaction. The stored photo is
/// removed again if the insert fails.
pub async fn create_point(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<CreatedPoint>> {
    let submission = SignupForm::from_multipart(multipart)
        .await?
        .into_submission()?;

    validate_image_upload(&submission.image.filename, &submission.image.data)?;

    let missing = ItemRepo::find_missing(&state.pool, &submission.item_ids).await?;
    if !missing.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown item id(s): {}",
            join_item_ids(&missing)
        ))));
    }

    let stored = state
        .uploads
        .save(&submission.image.filename, &submission.image.data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    let new_point = submission.fields.into_new_point(stored.clone());

    let created = match PointRepo::create(&state.pool, &new_point, &submission.item_ids).await {
        Ok(created) => created,
        Err(err) => {
            if let Err(e) = state.uploads.remove(&stored).await {
                tracing::warn!(file = %stored, error = %e, "Failed to remove orphaned upload");
            }
            return Err(err.into());
        }
    };

    tracing::info!(
        point_id = created.id,
        item_count = created.items.len(),
        image = %created.point.image,
        "Point registered",
    );

    Ok(Json(created))
}
