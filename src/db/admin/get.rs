use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{Admin, admin::AdminRecord},
};

pub async fn get_admin_by_email(
    email: &str,
    postgres: PgPool,
) -> Result<Option<AdminRecord>, AppError> {
    sqlx::query_as::<_, AdminRecord>(
        "SELECT id, email, name, password_hash, created_at, updated_at
            FROM admins
            WHERE LOWER(email) = LOWER($1)",
    )
    .bind(email)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to query admin: {}", e)))
}

/// Profile lookup; the password hash is never selected.
pub async fn get_admin_by_id(admin_id: Uuid, postgres: PgPool) -> Result<Admin, AppError> {
    sqlx::query_as::<_, Admin>(
        "SELECT id, email, name, created_at, updated_at FROM admins WHERE id = $1",
    )
    .bind(admin_id)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch admin: {}", e)))?
    .ok_or_else(|| AppError::NotFound("Admin not found".into()))
}
