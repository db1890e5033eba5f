use axum::http::StatusCode;
use redis::RedisError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Redis pool error: {0}")]
    RedisPoolError(String),

    #[error("Redis command error: {0}")]
    RedisCommandError(#[from] RedisError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Env error: {0}")]
    EnvError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Internal server error")]
    InternalError,

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn to_response(&self) -> (StatusCode, String) {
        match self {
            AppError::JwtError(_) => (StatusCode::UNAUTHORIZED, "Invalid or expired token".into()),
            AppError::Deserialization(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Transport(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            // Server faults keep their detail in the logs only
            AppError::RedisPoolError(_)
            | AppError::RedisCommandError(_)
            | AppError::PasswordHash(_)
            | AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::EnvError(_)
            | AppError::DatabaseError(_)
            | AppError::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected server error, please try again".into(),
            ),
        }
    }

    /// Rebuilds an error from a status and body returned by the API.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::BadRequest(body),
            StatusCode::UNAUTHORIZED => AppError::Unauthorized(body),
            StatusCode::FORBIDDEN => AppError::Forbidden(body),
            StatusCode::NOT_FOUND => AppError::NotFound(body),
            StatusCode::CONFLICT => AppError::Conflict(body),
            _ => AppError::Transport(format!("{status}: {body}")),
        }
    }
}

/// Maps a failed write to `Conflict` when a unique or foreign key constraint
/// rejected it, otherwise to `DatabaseError` prefixed with `context`.
pub fn constraint_error(err: sqlx::Error, conflict: &str, context: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
            AppError::Conflict(conflict.to_string())
        }
        _ => AppError::DatabaseError(format!("{context}: {err}")),
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

pub fn pool_error(e: bb8::RunError<RedisError>) -> AppError {
    match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    }
}
