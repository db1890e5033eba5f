use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::module::{MODULE_COLUMNS, get::get_module},
    errors::AppError,
    models::{LecturerModule, module::UpdateModulePayload},
};

pub async fn update_module(
    module_id: Uuid,
    changes: UpdateModulePayload,
    postgres: PgPool,
) -> Result<LecturerModule, AppError> {
    let current = get_module(module_id, postgres.clone()).await?;
    let updated = changes.apply_to(&current)?;

    let module = sqlx::query_as::<_, LecturerModule>(&format!(
        "UPDATE lecturer_modules
            SET lecturer_name = $2,
                module_name = $3,
                module_description = $4,
                module_objectives = $5,
                email = $6,
                is_active = $7
            WHERE id = $1
            RETURNING {MODULE_COLUMNS}"
    ))
    .bind(module_id)
    .bind(&updated.lecturer_name)
    .bind(&updated.module_name)
    .bind(&updated.module_description)
    .bind(&updated.module_objectives)
    .bind(&updated.email)
    .bind(updated.is_active)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update module: {}", e)))?
    .ok_or_else(|| AppError::NotFound(format!("Module with ID {} not found", module_id)))?;

    tracing::info!("Updated module {}", module.id);

    Ok(module)
}

/// Toggles rater visibility. Existing ratings are left untouched.
pub async fn set_module_active(
    module_id: Uuid,
    is_active: bool,
    postgres: PgPool,
) -> Result<LecturerModule, AppError> {
    let module = sqlx::query_as::<_, LecturerModule>(&format!(
        "UPDATE lecturer_modules SET is_active = $2 WHERE id = $1 RETURNING {MODULE_COLUMNS}"
    ))
    .bind(module_id)
    .bind(is_active)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update module status: {}", e)))?
    .ok_or_else(|| AppError::NotFound(format!("Module with ID {} not found", module_id)))?;

    tracing::info!(
        "Module {} is now {}",
        module.id,
        if module.is_active { "active" } else { "inactive" }
    );

    Ok(module)
}
