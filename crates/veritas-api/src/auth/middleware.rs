//! Auth middleware: one gate per route group, selected by configuration.
//!
//! Each gate verifies the request credential and stores the resulting
//! `Identity` in request extensions before the handler runs. Failures
//! short-circuit with 401 before any content logic executes.

use crate::auth::api_key::ApiKeyValidator;
use crate::auth::id_token::{parse_bearer, IdTokenVerifier};
use crate::auth::{ApiKeyIdentity, Identity, TokenIdentity};
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use veritas_core::AppError;

const API_KEY_HEADER: &str = "x-api-key";

/// State shared by the auth middlewares.
pub struct AuthState {
    pub id_tokens: IdTokenVerifier,
    pub api_keys: ApiKeyValidator,
}

/// Gate requiring a verified identity token (`Authorization: Bearer <token>`).
pub async fn require_id_token(
    State(auth): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match parse_bearer(header) {
        Ok(token) => token,
        Err(e) => return HttpAppError(e).into_response(),
    };

    match auth.id_tokens.verify(token).await {
        Ok(claims) => {
            request.extensions_mut().insert(Identity::Token(TokenIdentity {
                subject: claims.sub,
                email: claims.email,
            }));
            next.run(request).await
        }
        Err(e) => HttpAppError(e).into_response(),
    }
}

/// Gate requiring a valid static API key (`X-API-Key: <key>`).
pub async fn require_api_key(
    State(auth): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let candidate = match request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
    {
        Some(value) => value.to_string(),
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing API key header".to_string(),
            ))
            .into_response();
        }
    };

    if !auth.api_keys.verify(&candidate) {
        return HttpAppError(AppError::Unauthorized("Invalid API key".to_string()))
            .into_response();
    }

    request
        .extensions_mut()
        .insert(Identity::ApiKey(ApiKeyIdentity { key: candidate }));
    next.run(request).await
}
