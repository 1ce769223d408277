//! Upload handlers
//!
//! Both upload variants share one core flow: extract the multipart form,
//! write the bytes to the blob store under a generated name, then insert the
//! metadata row. The byte write must complete before the insert is attempted;
//! a stray file without a row is acceptable garbage, a row without a file is
//! not. The variants differ only in auth gate and response envelope.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use utoipa::ToSchema;
use veritas_core::models::{AdminUploadResponse, MediaItem, MobileUploadResponse};
use veritas_core::{AppError, ErrorMetadata};
use veritas_storage::generated_filename;

use crate::auth::Identity;
use crate::error::{app_error_from_storage, ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Multipart request body (OpenAPI documentation only).
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadRequest {
    title: String,
    category: String,
    #[schema(value_type = String, format = Binary)]
    file: String,
}

struct UploadForm {
    title: String,
    category: String,
    original_filename: String,
    data: Vec<u8>,
}

/// Extract title, category, and file content from the multipart form.
async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut title: Option<String> = None;
    let mut category: Option<String> = None;
    let mut original_filename: Option<String> = None;
    let mut data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "title" => {
                let value = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read title field: {}", e))
                })?;
                title = Some(value);
            }
            "category" => {
                let value = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read category field: {}", e))
                })?;
                category = Some(value);
            }
            "file" => {
                if data.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                original_filename = field.file_name().map(|s: &str| s.to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;
                data = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing required field: title".to_string()))?;
    let category = category
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing required field: category".to_string()))?;
    let data =
        data.ok_or_else(|| AppError::Validation("Missing required field: file".to_string()))?;

    Ok(UploadForm {
        title,
        category,
        original_filename: original_filename.unwrap_or_default(),
        data,
    })
}

/// Core upload flow shared by both variants.
async fn perform_upload(state: &AppState, form: UploadForm) -> Result<MediaItem, AppError> {
    let filename = generated_filename(&form.original_filename);

    state
        .storage
        .upload(&filename, form.data)
        .await
        .map_err(app_error_from_storage)?;

    let item = state
        .repository
        .insert(&form.title, &form.category, &filename)
        .await?;

    tracing::info!(
        item_id = item.id,
        category = %item.category,
        file_path = %item.file_path,
        "Media item uploaded"
    );

    Ok(item)
}

/// Admin upload: token-gated, failures propagate as HTTP errors.
#[utoipa::path(
    post,
    path = "/admin/upload",
    tag = "content",
    request_body(content = UploadRequest, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Item created", body = AdminUploadResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 422, description = "Missing required field", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "admin_upload"))]
pub async fn admin_upload(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    multipart: Multipart,
) -> Result<Json<AdminUploadResponse>, HttpAppError> {
    let form = extract_upload_form(multipart).await?;
    let item = perform_upload(&state, form).await?;

    tracing::debug!(admin = ?identity.email(), item_id = item.id, "Admin upload complete");

    Ok(Json(AdminUploadResponse::success(item)))
}

/// Mobile upload: key-gated. Every failure is reported inside the envelope
/// with HTTP 200 (`success: false`) - the shape the mobile clients parse.
#[utoipa::path(
    post,
    path = "/mobile/upload",
    tag = "content",
    request_body(content = UploadRequest, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Envelope with success flag", body = MobileUploadResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "mobile_upload"))]
pub async fn mobile_upload(
    State(state): State<Arc<AppState>>,
    _identity: Identity,
    multipart: Multipart,
) -> Json<MobileUploadResponse> {
    let result = match extract_upload_form(multipart).await {
        Ok(form) => perform_upload(&state, form).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(item) => Json(MobileUploadResponse::uploaded(item)),
        Err(e) => {
            tracing::warn!(error = %e, "Mobile upload failed");
            Json(MobileUploadResponse::failure(e.client_message()))
        }
    }
}
