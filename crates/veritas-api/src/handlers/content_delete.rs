use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use veritas_core::models::DeleteResponse;
use veritas_core::AppError;

use crate::auth::Identity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Delete an item: best-effort blob removal, then the authoritative row
/// delete. A missing blob-store file is tolerated; the row is what counts.
#[utoipa::path(
    delete,
    path = "/content/{item_id}",
    tag = "content",
    params(
        ("item_id" = i32, Path, description = "Media item ID")
    ),
    responses(
        (status = 200, description = "Item deleted", body = DeleteResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Unknown item", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_content", item_id = item_id))]
pub async fn delete_content(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Path(item_id): Path<i32>,
) -> Result<Json<DeleteResponse>, HttpAppError> {
    let item = state
        .repository
        .get_by_id(item_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

    // File removal is best-effort; absence (or failure) never blocks the
    // row delete.
    if let Err(e) = state.storage.delete(&item.file_path).await {
        tracing::warn!(
            error = %e,
            file_path = %item.file_path,
            "Failed to remove blob-store file during delete; continuing"
        );
    }

    let deleted = state.repository.delete(item_id).await?;
    if !deleted {
        // Lost a race against a concurrent delete of the same id.
        return Err(AppError::NotFound("Item not found".to_string()).into());
    }

    let admin = identity.email().map(String::from);
    tracing::info!(
        item_id = item.id,
        title = %item.title,
        admin = ?admin,
        "Media item deleted"
    );

    Ok(Json(DeleteResponse {
        message: format!("Deleted {}", item.title),
        admin,
    }))
}
