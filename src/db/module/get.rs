use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::module::MODULE_COLUMNS, errors::AppError, models::LecturerModule};

pub async fn get_module(module_id: Uuid, postgres: PgPool) -> Result<LecturerModule, AppError> {
    let module = sqlx::query_as::<_, LecturerModule>(&format!(
        "SELECT {MODULE_COLUMNS} FROM lecturer_modules WHERE id = $1"
    ))
    .bind(module_id)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch module: {}", e)))?;

    module.ok_or_else(|| AppError::NotFound(format!("Module with ID {} not found", module_id)))
}

/// The rateable list: active modules only.
pub async fn get_active_modules(postgres: PgPool) -> Result<Vec<LecturerModule>, AppError> {
    sqlx::query_as::<_, LecturerModule>(&format!(
        "SELECT {MODULE_COLUMNS}
            FROM lecturer_modules
            WHERE is_active = TRUE
            ORDER BY lecturer_name ASC, module_name ASC"
    ))
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch active modules: {}", e)))
}

pub async fn get_all_modules(postgres: PgPool) -> Result<Vec<LecturerModule>, AppError> {
    sqlx::query_as::<_, LecturerModule>(&format!(
        "SELECT {MODULE_COLUMNS}
            FROM lecturer_modules
            ORDER BY created_at DESC"
    ))
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch modules: {}", e)))
}
