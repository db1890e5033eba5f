use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    db::{
        module::{get_all_modules, get_module},
        rating::get_ratings,
    },
    errors::AppError,
    models::ModuleReport,
    report::{build_report, build_reports, export_csv},
    state::AppState,
};

pub async fn get_reports_handler(
    State(state): State<AppState>,
    _claims: AuthClaims,
) -> Result<Json<Vec<ModuleReport>>, (StatusCode, String)> {
    let modules = get_all_modules(state.postgres.clone()).await.map_err(|e| {
        tracing::error!("Error retrieving modules for reports: {}", e);
        e.to_response()
    })?;

    let ratings = get_ratings(None, state.postgres.clone()).await.map_err(|e| {
        tracing::error!("Error retrieving ratings for reports: {}", e);
        e.to_response()
    })?;

    Ok(Json(build_reports(&modules, &ratings)))
}

async fn load_report(module_id: Uuid, state: &AppState) -> Result<ModuleReport, AppError> {
    let module = get_module(module_id, state.postgres.clone()).await?;
    let ratings = get_ratings(Some(module_id), state.postgres.clone()).await?;
    Ok(build_report(&module, &ratings))
}

pub async fn get_report_handler(
    Path(module_id): Path<Uuid>,
    State(state): State<AppState>,
    _claims: AuthClaims,
) -> Result<Json<ModuleReport>, (StatusCode, String)> {
    let report = load_report(module_id, &state).await.map_err(|e| {
        tracing::error!("Error building report for module {}: {}", module_id, e);
        e.to_response()
    })?;

    Ok(Json(report))
}

pub async fn export_report_handler(
    Path(module_id): Path<Uuid>,
    State(state): State<AppState>,
    _claims: AuthClaims,
) -> Result<Response, (StatusCode, String)> {
    let report = load_report(module_id, &state).await.map_err(|e| {
        tracing::error!("Error exporting report for module {}: {}", module_id, e);
        e.to_response()
    })?;

    let export = export_csv(&report);
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        export.filename.replace('"', "")
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"report.csv\""));

    tracing::info!("Exported report for module {}", module_id);

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}
