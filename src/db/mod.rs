pub mod admin;
pub mod module;
pub mod rating;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::errors::AppError;

pub async fn connect(database_url: &str) -> Result<PgPool, AppError> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to connect to database: {}", e)))
}

pub async fn run_migrations(postgres: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations")
        .run(postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations applied");
    Ok(())
}
