//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::auth::middleware::{require_api_key, require_id_token, AuthState};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use veritas_core::Config;

/// Setup all application routes
pub fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
    auth_state: Arc<AuthState>,
) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/content", get(handlers::content_list::list_content));

    // Token-gated routes
    let token_routes = Router::new()
        .route("/admin/upload", post(handlers::upload::admin_upload))
        .route(
            "/content/{item_id}",
            patch(handlers::content_update::update_content)
                .delete(handlers::content_delete::delete_content),
        )
        .layer(axum::middleware::from_fn_with_state(
            auth_state.clone(),
            require_id_token,
        ));

    // Key-gated routes
    let mobile_routes = Router::new()
        .route("/mobile/upload", post(handlers::upload::mobile_upload))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            require_api_key,
        ));

    let app = public_routes
        .merge(token_routes)
        .merge(mobile_routes)
        // Uploaded files are served back as static content
        .nest_service("/files", ServeDir::new(&config.upload_dir))
        .layer(DefaultBodyLimit::max(config.max_upload_size_bytes))
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .merge(RapiDoc::with_openapi("/api/openapi.json", ApiDoc::openapi()).path("/docs"));

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin {}: {}", origin, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Ok(cors)
}
