//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use veritas_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Veritas Content API",
        version = "0.1.0",
        description = "Content-management API: file uploads with metadata, listing with \
                       substring search and category filters, partial updates, and deletes. \
                       Admin operations require an identity token; mobile uploads require a \
                       static API key. Uploaded files are served under /files/."
    ),
    paths(
        handlers::health::health,
        handlers::upload::admin_upload,
        handlers::upload::mobile_upload,
        handlers::content_list::list_content,
        handlers::content_update::update_content,
        handlers::content_delete::delete_content,
    ),
    components(
        schemas(
            models::MediaItem,
            models::ContentEntry,
            models::AdminUploadResponse,
            models::MobileUploadResponse,
            models::UpdateResponse,
            models::DeleteResponse,
            handlers::upload::UploadRequest,
            handlers::content_update::UpdateForm,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "content", description = "Media item upload, listing, update, and delete operations"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;
