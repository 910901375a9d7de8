//! Server configuration
//!
//! All settings come from environment variables:
//!
//! | Variable | Default | Notes |
//! |----------|---------|-------|
//! | HTTP_PORT | 3000 | HTTP API port |
//! | DATABASE_PATH | ./bistro.db | RocksDB directory, or `memory` |
//! | JWT_SECRET | (required) | HS256 signing key, min 32 bytes |
//! | JWT_EXPIRATION_MINUTES | 60 | token lifetime |
//! | ENVIRONMENT | development | development / staging / production |
//! | ADMIN_EMAIL / ADMIN_PASSWORD | (unset) | seed admin account at startup |
//!
//! Loading fails fast when `JWT_SECRET` is absent or too short; the
//! server refuses to start rather than falling back to a baked-in key.

use crate::auth::JwtConfig;
use crate::utils::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// RocksDB directory, or the literal `memory` for tests
    pub database_path: String,
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    /// Seed admin credentials; both must be set for seeding to run
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let jwt = JwtConfig::from_env()
            .map_err(|e| AppError::internal(format!("JWT configuration error: {e}")))?;

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./bistro.db".into()),
            jwt,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
