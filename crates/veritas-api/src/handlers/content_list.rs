use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use veritas_core::models::ContentEntry;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring match on title.
    pub q: Option<String>,
    /// Exact-match category filter; `ALL` means no restriction.
    pub category: Option<String>,
}

/// List content matching the optional filters. No auth required.
/// An empty result is a 200 with an empty array, not an error.
#[utoipa::path(
    get,
    path = "/content",
    tag = "content",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive substring match on title"),
        ("category" = Option<String>, Query, description = "Exact category filter; 'ALL' disables it")
    ),
    responses(
        (status = 200, description = "Matching items", body = [ContentEntry]),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_content"))]
pub async fn list_content(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ContentEntry>>, HttpAppError> {
    let items = state
        .repository
        .list(query.q.as_deref(), query.category.as_deref())
        .await?;

    let entries = items
        .iter()
        .map(|item| ContentEntry::from_item(item, &state.files_base))
        .collect();

    Ok(Json(entries))
}
