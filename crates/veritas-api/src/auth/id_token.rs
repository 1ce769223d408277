//! Bearer-token verification against the external identity provider.
//!
//! Tokens are RS256 JWTs verified against the provider's published JWKS
//! (JSON Web Key Set), with issuer and audience pinned from configuration.
//! Keys are cached by `kid` with a TTL; verification results are never
//! cached - every request reverifies.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use veritas_core::AppError;

const DEFAULT_KEY_CACHE_TTL_SECONDS: i64 = 3600;

/// JWKS (JSON Web Key Set) structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// JSON Web Key structure (RSA members only; the identity provider signs
/// with RS256)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    #[serde(rename = "kty")]
    pub key_type: String,
    #[serde(rename = "kid")]
    pub key_id: Option<String>,
    #[serde(rename = "alg")]
    pub algorithm: Option<String>,
    #[serde(rename = "n")]
    pub modulus: Option<String>,
    #[serde(rename = "e")]
    pub exponent: Option<String>,
}

/// Claims carried by a verified identity token.
#[derive(Debug, Serialize, Deserialize)]
pub struct IdTokenClaims {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub aud: String,
    pub iss: String,
    pub exp: i64,
}

/// Cached public key with expiration
#[derive(Clone)]
struct CachedKey {
    key: DecodingKey,
    expires_at: DateTime<Utc>,
}

/// Identity token verifier with JWKS key rotation support.
pub struct IdTokenVerifier {
    jwks_url: String,
    issuer: String,
    audience: String,
    cache: RwLock<HashMap<String, CachedKey>>,
    cache_ttl_seconds: i64,
}

impl IdTokenVerifier {
    pub fn new(jwks_url: String, issuer: String, audience: String) -> Self {
        Self {
            jwks_url,
            issuer,
            audience,
            cache: RwLock::new(HashMap::new()),
            cache_ttl_seconds: DEFAULT_KEY_CACHE_TTL_SECONDS,
        }
    }

    /// Fetch JWKS from the configured URL
    async fn fetch_jwks(&self) -> Result<Jwks, AppError> {
        let response = reqwest::get(&self.jwks_url)
            .await
            .map_err(|e| AppError::Unauthorized(format!("Failed to fetch JWKS: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized(format!(
                "JWKS endpoint returned error: {}",
                response.status()
            )));
        }

        let jwks: Jwks = response
            .json()
            .await
            .map_err(|e| AppError::Unauthorized(format!("Failed to parse JWKS: {}", e)))?;

        Ok(jwks)
    }

    fn jwk_to_decoding_key(jwk: &Jwk) -> Result<DecodingKey, AppError> {
        if jwk.key_type != "RSA" {
            return Err(AppError::Unauthorized(format!(
                "Unsupported key type: {}",
                jwk.key_type
            )));
        }
        let n = jwk
            .modulus
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("RSA key missing modulus".to_string()))?;
        let e = jwk
            .exponent
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("RSA key missing exponent".to_string()))?;

        // jsonwebtoken handles the base64url decoding of the components
        DecodingKey::from_rsa_components(n, e)
            .map_err(|e| AppError::Unauthorized(format!("Failed to create RSA key: {}", e)))
    }

    /// Get decoding key for a given key ID, with caching
    async fn get_decoding_key(&self, kid: Option<&str>) -> Result<DecodingKey, AppError> {
        let cache_key = kid.unwrap_or("default").to_string();

        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.get(&cache_key) {
                if cached.expires_at > Utc::now() {
                    return Ok(cached.key.clone());
                }
            }
        }

        // Cache miss or expired - fetch fresh JWKS
        let jwks = self.fetch_jwks().await?;

        let jwk = if let Some(kid) = kid {
            jwks.keys
                .iter()
                .find(|k| k.key_id.as_deref() == Some(kid))
                .ok_or_else(|| {
                    AppError::Unauthorized(format!("Key ID {} not found in JWKS", kid))
                })?
        } else {
            jwks.keys
                .first()
                .ok_or_else(|| AppError::Unauthorized("No keys found in JWKS".to_string()))?
        };

        let decoding_key = Self::jwk_to_decoding_key(jwk)?;

        {
            let mut cache = self.cache.write().await;
            cache.insert(
                cache_key,
                CachedKey {
                    key: decoding_key.clone(),
                    expires_at: Utc::now() + chrono::Duration::seconds(self.cache_ttl_seconds),
                },
            );
        }

        Ok(decoding_key)
    }

    /// Validate and decode an identity token.
    ///
    /// Every failure mode (expired, malformed, wrong signature, wrong
    /// issuer/audience) collapses into the same Unauthorized error; the
    /// caller is not told which check failed.
    pub async fn verify(&self, token: &str) -> Result<IdTokenClaims, AppError> {
        let header = jsonwebtoken::decode_header(token)
            .map_err(|_| AppError::Unauthorized("Invalid identity token".to_string()))?;

        let decoding_key = self.get_decoding_key(header.kid.as_deref()).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let token_data =
            decode::<IdTokenClaims>(token, &decoding_key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "Identity token validation failed");
                AppError::Unauthorized("Invalid identity token".to_string())
            })?;

        Ok(token_data.claims)
    }
}

/// Extract the bearer token from an Authorization header value.
/// Fails when the header is absent or does not carry the `Bearer ` prefix.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AppError> {
    let header = header
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_ok() {
        assert_eq!(parse_bearer(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_parse_bearer_missing_header() {
        let err = parse_bearer(None).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_parse_bearer_wrong_scheme() {
        let err = parse_bearer(Some("Basic dXNlcjpwYXNz")).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_parse_bearer_is_case_sensitive() {
        assert!(parse_bearer(Some("bearer abc")).is_err());
    }

    #[test]
    fn test_jwk_to_decoding_key_rejects_non_rsa() {
        let jwk = Jwk {
            key_type: "EC".to_string(),
            key_id: None,
            algorithm: None,
            modulus: None,
            exponent: None,
        };
        assert!(IdTokenVerifier::jwk_to_decoding_key(&jwk).is_err());
    }

    #[test]
    fn test_jwk_to_decoding_key_requires_components() {
        let jwk = Jwk {
            key_type: "RSA".to_string(),
            key_id: Some("kid-1".to_string()),
            algorithm: Some("RS256".to_string()),
            modulus: None,
            exponent: None,
        };
        assert!(IdTokenVerifier::jwk_to_decoding_key(&jwk).is_err());
    }
}
