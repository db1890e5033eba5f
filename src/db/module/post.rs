use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::module::MODULE_COLUMNS,
    errors::AppError,
    models::{LecturerModule, module::NewModule},
};

pub async fn create_module(new_module: NewModule, postgres: PgPool) -> Result<LecturerModule, AppError> {
    let module = sqlx::query_as::<_, LecturerModule>(&format!(
        "INSERT INTO lecturer_modules
            (id, lecturer_name, module_name, module_description, module_objectives, email, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {MODULE_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(&new_module.lecturer_name)
    .bind(&new_module.module_name)
    .bind(&new_module.module_description)
    .bind(&new_module.module_objectives)
    .bind(&new_module.email)
    .bind(new_module.is_active)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create module: {}", e)))?;

    tracing::info!(
        "Created module '{}' for {} (ID: {})",
        module.module_name,
        module.lecturer_name,
        module.id
    );

    Ok(module)
}
