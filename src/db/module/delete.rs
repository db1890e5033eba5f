use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::rating::count_ratings,
    errors::{AppError, constraint_error},
};

/// Removes a module that has never been rated. Modules with ratings should
/// be deactivated instead.
pub async fn delete_module(module_id: Uuid, postgres: PgPool) -> Result<(), AppError> {
    let rating_count = count_ratings(module_id, postgres.clone()).await?;
    if rating_count > 0 {
        return Err(AppError::Conflict(format!(
            "Module has {} ratings; deactivate it instead",
            rating_count
        )));
    }

    let result = sqlx::query("DELETE FROM lecturer_modules WHERE id = $1")
        .bind(module_id)
        .execute(&postgres)
        .await
        // A rating stored after the count trips the foreign key
        .map_err(|e| {
            constraint_error(
                e,
                "Module has ratings; deactivate it instead",
                "Failed to delete module",
            )
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Module with ID {} not found",
            module_id
        )));
    }

    tracing::info!("Deleted module {}", module_id);
    Ok(())
}
