use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::hash_password_blocking,
    db::admin::get::get_admin_by_email,
    errors::{AppError, constraint_error},
    models::Admin,
};

const DUPLICATE_EMAIL: &str = "Admin with this email already exists";

pub async fn create_admin(
    email: String,
    password: String,
    name: Option<String>,
    postgres: PgPool,
) -> Result<Admin, AppError> {
    if get_admin_by_email(&email, postgres.clone()).await?.is_some() {
        return Err(AppError::Conflict(DUPLICATE_EMAIL.into()));
    }

    let password_hash = hash_password_blocking(password).await?;

    let admin = sqlx::query_as::<_, Admin>(
        "INSERT INTO admins (id, email, name, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING id, email, name, created_at, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(&name)
    .bind(&password_hash)
    .fetch_one(&postgres)
    .await
    // A concurrent registration can still win the race to the unique index
    .map_err(|e| constraint_error(e, DUPLICATE_EMAIL, "Failed to create admin"))?;

    tracing::info!("Created admin {} (ID: {})", admin.email, admin.id);

    Ok(admin)
}
