//! Application initialization: database, storage, auth, routes.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::auth::api_key::ApiKeyValidator;
use crate::auth::id_token::IdTokenVerifier;
use crate::auth::middleware::AuthState;
use crate::state::AppState;
use axum::Router;
use std::sync::Arc;
use veritas_core::Config;
use veritas_db::MediaItemRepository;

/// Wire up every dependency and return the ready-to-serve router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    config.validate()?;

    let pool = database::setup_database(&config).await?;
    let blob_store = storage::setup_storage(&config).await?;
    let repository = MediaItemRepository::new(pool.clone());

    let auth_state = Arc::new(AuthState {
        id_tokens: IdTokenVerifier::new(
            config.identity_jwks_url.clone(),
            config.identity_issuer.clone(),
            config.identity_audience.clone(),
        ),
        api_keys: ApiKeyValidator::new(config.mobile_api_keys.clone()),
    });

    let state = Arc::new(AppState {
        pool,
        repository,
        storage: blob_store,
        files_base: config.public_files_base(),
        config,
    });

    let router = routes::setup_routes(&state.config, state.clone(), auth_state)?;

    Ok((state, router))
}
