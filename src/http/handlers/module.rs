use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    db::module::{
        create_module, delete_module, get_active_modules, get_all_modules, set_module_active,
        update_module,
    },
    models::{
        LecturerModule,
        module::{CreateModulePayload, SetActivePayload, UpdateModulePayload},
    },
    state::AppState,
};

pub async fn get_active_modules_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LecturerModule>>, (StatusCode, String)> {
    let modules = get_active_modules(state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving active modules: {}", e);
            e.to_response()
        })?;

    Ok(Json(modules))
}

pub async fn get_all_modules_handler(
    State(state): State<AppState>,
    _claims: AuthClaims,
) -> Result<Json<Vec<LecturerModule>>, (StatusCode, String)> {
    let modules = get_all_modules(state.postgres.clone()).await.map_err(|e| {
        tracing::error!("Error retrieving modules: {}", e);
        e.to_response()
    })?;

    Ok(Json(modules))
}

pub async fn create_module_handler(
    State(state): State<AppState>,
    _claims: AuthClaims,
    Json(payload): Json<CreateModulePayload>,
) -> Result<Json<LecturerModule>, (StatusCode, String)> {
    let new_module = payload.validate().map_err(|e| e.to_response())?;

    let module = create_module(new_module, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error creating module: {}", e);
            e.to_response()
        })?;

    Ok(Json(module))
}

pub async fn update_module_handler(
    Path(module_id): Path<Uuid>,
    State(state): State<AppState>,
    _claims: AuthClaims,
    Json(payload): Json<UpdateModulePayload>,
) -> Result<Json<LecturerModule>, (StatusCode, String)> {
    let module = update_module(module_id, payload, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error updating module {}: {}", module_id, e);
            e.to_response()
        })?;

    Ok(Json(module))
}

pub async fn set_module_active_handler(
    Path(module_id): Path<Uuid>,
    State(state): State<AppState>,
    _claims: AuthClaims,
    Json(payload): Json<SetActivePayload>,
) -> Result<Json<LecturerModule>, (StatusCode, String)> {
    let module = set_module_active(module_id, payload.is_active, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error changing status of module {}: {}", module_id, e);
            e.to_response()
        })?;

    Ok(Json(module))
}

pub async fn delete_module_handler(
    Path(module_id): Path<Uuid>,
    State(state): State<AppState>,
    _claims: AuthClaims,
) -> Result<StatusCode, (StatusCode, String)> {
    delete_module(module_id, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error deleting module {}: {}", module_id, e);
            e.to_response()
        })?;

    Ok(StatusCode::NO_CONTENT)
}
