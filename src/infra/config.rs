//! Centralized configuration (environment variables + defaults).

const DEFAULT_SECRET: &str = "my32byteverysecretkey12345678901";

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Bind address for the API server.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}

/// Storage backend: `postgres` (default) or `memory` (local dev, no DB).
pub fn storage_backend() -> String {
    std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "postgres".to_string())
}

/// Login credentials and token parameters.
///
/// Defaults keep the historical token contract (issuer/audience/claims)
/// intact; production deployments are expected to override every field
/// through the environment.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let secret =
            std::env::var("AUTH_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        if secret == DEFAULT_SECRET {
            tracing::warn!("AUTH_SECRET not set; using the built-in development signing key");
        }
        AuthConfig {
            username: std::env::var("AUTH_USERNAME").unwrap_or_else(|_| "mile".to_string()),
            password: std::env::var("AUTH_PASSWORD").unwrap_or_else(|_| "mile123".to_string()),
            secret,
            issuer: std::env::var("AUTH_ISSUER").unwrap_or_else(|_| "YourIssuer".to_string()),
            audience: std::env::var("AUTH_AUDIENCE")
                .unwrap_or_else(|_| "YourAudience".to_string()),
            token_ttl_secs: 3600,
        }
    }
}
