use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{module::get_module, rating::RATING_COLUMNS},
    errors::AppError,
    models::{
        Rating,
        rating::{NewRating, SubmissionMeta},
    },
};

/// Stores a validated rating for an existing, active module.
///
/// There is no per-rater uniqueness check here; duplicate prevention is the
/// client-side guard's job and is advisory only.
pub async fn create_rating(
    new_rating: NewRating,
    meta: SubmissionMeta,
    postgres: PgPool,
) -> Result<Rating, AppError> {
    let module = get_module(new_rating.lecturer_module_id, postgres.clone()).await?;
    if !module.is_active {
        return Err(AppError::BadRequest(format!(
            "Module '{}' is not accepting ratings",
            module.module_name
        )));
    }

    let [c1, c2, c3, c4, c5] = new_rating.scores;

    let rating = sqlx::query_as::<_, Rating>(&format!(
        "INSERT INTO ratings
            (id, lecturer_module_id, criteria_1_score, criteria_2_score, criteria_3_score,
             criteria_4_score, criteria_5_score, remarks, ip_address, user_agent)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {RATING_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(new_rating.lecturer_module_id)
    .bind(c1)
    .bind(c2)
    .bind(c3)
    .bind(c4)
    .bind(c5)
    .bind(&new_rating.remarks)
    .bind(&meta.ip_address)
    .bind(&meta.user_agent)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create rating: {}", e)))?;

    tracing::info!(
        "Stored rating {} for module {}",
        rating.id,
        rating.lecturer_module_id
    );

    Ok(rating)
}
