use axum::{
    Json,
    extract::{FromRequestParts, Query, State},
    http::{StatusCode, header::USER_AGENT, request::Parts},
};

use crate::{
    db::rating::{create_rating, get_ratings},
    middleware::client_ip,
    models::{
        Rating,
        rating::{RatingFilter, RatingPayload, SubmissionMeta},
    },
    state::AppState,
};

/// Captures where a submission came from for auditing.
pub struct ClientMeta(pub SubmissionMeta);

impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.chars().take(512).collect());

        Ok(Self(SubmissionMeta {
            ip_address: client_ip(&parts.headers, &parts.extensions),
            user_agent,
        }))
    }
}

pub async fn get_ratings_handler(
    State(state): State<AppState>,
    Query(filter): Query<RatingFilter>,
) -> Result<Json<Vec<Rating>>, (StatusCode, String)> {
    let ratings = get_ratings(filter.lecturer_module_id, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving ratings: {}", e);
            e.to_response()
        })?;

    Ok(Json(ratings))
}

pub async fn create_rating_handler(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
    Json(payload): Json<RatingPayload>,
) -> Result<Json<Rating>, (StatusCode, String)> {
    // Reject before touching the database so nothing partial is stored
    let new_rating = payload.validate().map_err(|e| {
        tracing::debug!("Rejected rating: {}", e);
        e.to_response()
    })?;

    let rating = create_rating(new_rating, meta, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error creating rating: {}", e);
            e.to_response()
        })?;

    Ok(Json(rating))
}
