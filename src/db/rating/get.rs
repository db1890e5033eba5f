use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::rating::RATING_COLUMNS, errors::AppError, models::Rating};

/// Ratings newest first, optionally limited to one module.
pub async fn get_ratings(module_id: Option<Uuid>, postgres: PgPool) -> Result<Vec<Rating>, AppError> {
    let ratings = match module_id {
        Some(module_id) => {
            sqlx::query_as::<_, Rating>(&format!(
                "SELECT {RATING_COLUMNS}
                    FROM ratings
                    WHERE lecturer_module_id = $1
                    ORDER BY created_at DESC"
            ))
            .bind(module_id)
            .fetch_all(&postgres)
            .await
        }
        None => {
            sqlx::query_as::<_, Rating>(&format!(
                "SELECT {RATING_COLUMNS} FROM ratings ORDER BY created_at DESC"
            ))
            .fetch_all(&postgres)
            .await
        }
    }
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch ratings: {}", e)))?;

    Ok(ratings)
}

pub async fn count_ratings(module_id: Uuid, postgres: PgPool) -> Result<i64, AppError> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ratings WHERE lecturer_module_id = $1")
        .bind(module_id)
        .fetch_one(&postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to count ratings: {}", e)))
}
