use std::{str::FromStr, time::Duration};

use crate::errors::AppError;

/// Server settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_ttl: chrono::Duration,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub allow_admin_registration: bool,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let jwt_ttl_hours: i64 = optional("JWT_TTL_HOURS", 168)?;
        let request_timeout_secs: u64 = optional("REQUEST_TIMEOUT_SECS", 30)?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_ttl: chrono::Duration::hours(jwt_ttl_hours),
            port: optional("PORT", 3001)?,
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            allow_admin_registration: optional("ALLOW_ADMIN_REGISTRATION", false)?,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// Settings for tests and tooling that never touch the environment.
    pub fn for_secret(database_url: &str, jwt_secret: &str) -> Self {
        Self {
            database_url: database_url.to_string(),
            jwt_secret: jwt_secret.to_string(),
            jwt_ttl: chrono::Duration::hours(168),
            port: 3001,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            allow_admin_registration: false,
            request_timeout: Duration::from_secs(30),
        }
    }
}

fn required(key: &str) -> Result<String, AppError> {
    std::env::var(key).map_err(|_| AppError::EnvError(format!("{key} must be set")))
}

fn optional<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::EnvError(format!("{key} has an invalid value: {raw}"))),
        Err(_) => Ok(default),
    }
}
