//! Auth gate: two independent verifiers (identity token, static API key)
//! producing one internal `Identity` consumed uniformly by the handlers.

pub mod api_key;
pub mod id_token;
pub mod middleware;

use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;

/// Identity established from a verified bearer token.
#[derive(Debug, Clone)]
pub struct TokenIdentity {
    pub subject: String,
    pub email: Option<String>,
}

/// Identity established from a verified static API key.
#[derive(Debug, Clone)]
pub struct ApiKeyIdentity {
    pub key: String,
}

/// Verified caller identity, stored in request extensions by the auth
/// middleware. Handlers consume it without caring which gate admitted it.
#[derive(Debug, Clone)]
pub enum Identity {
    Token(TokenIdentity),
    ApiKey(ApiKeyIdentity),
}

impl Identity {
    /// Claimed email of the caller, when the token carried one.
    pub fn email(&self) -> Option<&str> {
        match self {
            Identity::Token(token) => token.email.as_deref(),
            Identity::ApiKey(_) => None,
        }
    }
}

// Implement FromRequestParts so handlers can take Identity alongside
// Multipart (Extension cannot be combined with Multipart).
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Identity>().cloned().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Missing identity", "UNAUTHORIZED")),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_identity_email() {
        let identity = Identity::Token(TokenIdentity {
            subject: "user-1".to_string(),
            email: Some("admin@veritas.example".to_string()),
        });
        assert_eq!(identity.email(), Some("admin@veritas.example"));
    }

    #[test]
    fn test_api_key_identity_has_no_email() {
        let identity = Identity::ApiKey(ApiKeyIdentity {
            key: "key-1".to_string(),
        });
        assert_eq!(identity.email(), None);
    }
}
