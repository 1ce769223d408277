//! Configuration module
//!
//! Typed application settings loaded from environment variables
//! (a `.env` file is honored in development via dotenvy).

use std::env;

// Common constants
const SERVER_PORT: u16 = 8000;
const DB_MAX_CONNECTIONS: u32 = 10;
const DB_MIN_CONNECTIONS: u32 = 1;
const DB_TIMEOUT_SECS: u64 = 60;
const MAX_UPLOAD_SIZE_MB: usize = 50;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    /// Advertised host used to build public file URLs (not the bind address).
    pub server_host: String,
    pub upload_dir: String,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_timeout_seconds: u64,
    pub max_upload_size_bytes: usize,
    // Identity provider (bearer-token verification)
    pub identity_issuer: String,
    pub identity_audience: String,
    pub identity_jwks_url: String,
    /// Static allow-list of mobile upload keys, loaded once at startup.
    pub mobile_api_keys: Vec<String>,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let mobile_api_keys: Vec<String> = env::var("MOBILE_API_KEYS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DB_MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(DB_MAX_CONNECTIONS),
            db_min_connections: env::var("DB_MIN_CONNECTIONS")
                .unwrap_or_else(|_| DB_MIN_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(DB_MIN_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DB_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DB_TIMEOUT_SECS),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            identity_issuer: env::var("IDENTITY_ISSUER")
                .map_err(|_| anyhow::anyhow!("IDENTITY_ISSUER must be set"))?,
            identity_audience: env::var("IDENTITY_AUDIENCE")
                .map_err(|_| anyhow::anyhow!("IDENTITY_AUDIENCE must be set"))?,
            identity_jwks_url: env::var("IDENTITY_JWKS_URL")
                .map_err(|_| anyhow::anyhow!("IDENTITY_JWKS_URL must be set"))?,
            mobile_api_keys,
            environment,
        })
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be at least 1"));
        }
        if self.is_production() && self.cors_origins.contains(&"*".to_string()) {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        if self.mobile_api_keys.is_empty() {
            tracing::warn!("MOBILE_API_KEYS is empty; mobile upload will reject every request");
        }
        Ok(())
    }

    /// Base URL under which uploaded files are served, trailing slash included.
    pub fn public_files_base(&self) -> String {
        format!("http://{}:{}/files/", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgresql://localhost/veritas".to_string(),
            server_port: 8000,
            server_host: "127.0.0.1".to_string(),
            upload_dir: "uploads".to_string(),
            cors_origins: vec!["*".to_string()],
            db_max_connections: 10,
            db_min_connections: 1,
            db_timeout_seconds: 60,
            max_upload_size_bytes: 50 * 1024 * 1024,
            identity_issuer: "https://securetoken.google.com/veritas".to_string(),
            identity_audience: "veritas".to_string(),
            identity_jwks_url: "https://example.com/jwks.json".to_string(),
            mobile_api_keys: vec!["key-1".to_string()],
            environment: "development".to_string(),
        }
    }

    #[test]
    fn test_public_files_base() {
        let config = test_config();
        assert_eq!(config.public_files_base(), "http://127.0.0.1:8000/files/");
    }

    #[test]
    fn test_validate_rejects_wildcard_cors_in_production() {
        let mut config = test_config();
        config.environment = "production".to_string();
        assert!(config.validate().is_err());

        config.cors_origins = vec!["https://veritas.example".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_pool() {
        let mut config = test_config();
        config.db_max_connections = 0;
        assert!(config.validate().is_err());
    }
}
