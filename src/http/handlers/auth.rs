use axum::{Json, extract::State, http::StatusCode};

use crate::{
    auth::{AuthClaims, generate_jwt, verify_password_blocking},
    db::admin::{create_admin, get_admin_by_email, get_admin_by_id},
    errors::AppError,
    models::{
        Admin,
        admin::{LoginPayload, RegisterPayload, Session},
    },
    state::AppState,
};

const MIN_PASSWORD_LEN: usize = 8;

pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Json<Admin>, (StatusCode, String)> {
    if !state.config.allow_admin_registration {
        return Err(AppError::Forbidden("Admin registration is disabled".into()).to_response());
    }

    let (Some(email), Some(password)) = (
        payload.email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()),
        payload.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::BadRequest("Email and password are required".into()).to_response());
    };

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ))
        .to_response());
    }

    let name = payload.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

    match create_admin(email, password, name, state.postgres.clone()).await {
        Ok(admin) => {
            tracing::info!("Admin registered: {}", admin.email);
            Ok(Json(admin))
        }
        Err(err) => {
            tracing::error!("Error registering admin: {}", err);
            Err(err.to_response())
        }
    }
}

pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<Session>, (StatusCode, String)> {
    let (Some(email), Some(password)) = (
        payload.email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()),
        payload.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::BadRequest("Email and password are required".into()).to_response());
    };

    let invalid = || AppError::Unauthorized("Invalid email or password".into()).to_response();

    let record = get_admin_by_email(&email, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error looking up admin: {}", e);
            e.to_response()
        })?
        .ok_or_else(invalid)?;

    let valid = verify_password_blocking(password, record.password_hash.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error verifying password: {}", e);
            e.to_response()
        })?;

    if !valid {
        tracing::warn!("Failed login attempt for {}", email);
        return Err(invalid());
    }

    let admin = Admin::from(record);
    let token = generate_jwt(&admin, &state.config.jwt_secret, state.config.jwt_ttl)
        .map_err(|e| {
            tracing::error!("Error issuing token: {}", e);
            e.to_response()
        })?;

    tracing::info!("Admin logged in: {}", admin.email);
    Ok(Json(Session { admin, token }))
}

pub async fn me_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<Admin>, (StatusCode, String)> {
    let admin_id = claims.admin_id().map_err(|e| e.to_response())?;

    let admin = get_admin_by_id(admin_id, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving admin profile: {}", e);
            e.to_response()
        })?;

    Ok(Json(admin))
}
