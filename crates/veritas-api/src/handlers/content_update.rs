use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Form, Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use veritas_core::models::{UpdateResponse, UpdateStatus};
use veritas_core::AppError;

use crate::auth::Identity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateForm {
    pub title: Option<String>,
    pub category: Option<String>,
}

/// Partially update an item's title and/or category.
///
/// Fields not supplied (or supplied empty) keep their current value. With
/// neither field supplied the item is returned unchanged under a distinct
/// `"no changes"` status - a success, not an error.
#[utoipa::path(
    patch,
    path = "/content/{item_id}",
    tag = "content",
    params(
        ("item_id" = i32, Path, description = "Media item ID")
    ),
    request_body(content = UpdateForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Updated (or unchanged) item", body = UpdateResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Unknown item", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, form), fields(operation = "update_content", item_id = item_id))]
pub async fn update_content(
    State(state): State<Arc<AppState>>,
    _identity: Identity,
    Path(item_id): Path<i32>,
    Form(form): Form<UpdateForm>,
) -> Result<Json<UpdateResponse>, HttpAppError> {
    // Empty strings count as "not supplied", keeping the field untouched.
    let title = form.title.as_deref().filter(|t| !t.trim().is_empty());
    let category = form.category.as_deref().filter(|c| !c.trim().is_empty());

    let existing = state
        .repository
        .get_by_id(item_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

    if title.is_none() && category.is_none() {
        return Ok(Json(UpdateResponse::new(UpdateStatus::NoChanges, existing)));
    }

    let updated = state
        .repository
        .update_fields(item_id, title, category)
        .await?
        // The row can vanish between fetch and update; report it like any
        // other unknown id.
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

    tracing::info!(
        item_id = updated.id,
        title_changed = title.is_some(),
        category_changed = category.is_some(),
        "Media item updated"
    );

    Ok(Json(UpdateResponse::new(UpdateStatus::Updated, updated)))
}
