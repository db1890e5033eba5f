//! Typed HTTP client for the assessment API, plus the rating portal built on
//! top of it.

pub mod portal;

use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{
        Admin, LecturerModule, ModuleReport, Rating,
        admin::{LoginPayload, Session},
        module::{CreateModulePayload, SetActivePayload, UpdateModulePayload},
        rating::RatingPayload,
    },
    report::{CsvExport, build_report, export_csv},
};

pub use portal::{FormGate, PortalEntry, RatingForm, RatingPortal};

#[derive(Debug, Clone)]
pub struct AssessClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl AssessClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, AppError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("Not logged in".into()))?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, AppError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::from_status(status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Deserialization(format!("Unexpected response body: {}", e)))
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        request: RequestBuilder,
        body: &B,
    ) -> Result<T, AppError> {
        Self::send(request.json(body)).await
    }

    /// Logs in and keeps the issued token for later admin calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session, AppError> {
        let payload = LoginPayload {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        let session: Session =
            Self::send_json(self.request(Method::POST, "/api/auth/login"), &payload).await?;

        tracing::info!("Logged in as {}", session.admin.email);
        self.token = Some(session.token.clone());
        Ok(session)
    }

    pub async fn me(&self) -> Result<Admin, AppError> {
        Self::send(self.authorized(Method::GET, "/api/auth/me")?).await
    }

    /// Modules currently open for rating.
    pub async fn list_active_modules(&self) -> Result<Vec<LecturerModule>, AppError> {
        Self::send(self.request(Method::GET, "/api/modules")).await
    }

    pub async fn list_all_modules(&self) -> Result<Vec<LecturerModule>, AppError> {
        Self::send(self.authorized(Method::GET, "/api/modules/all")?).await
    }

    pub async fn create_module(&self, payload: &CreateModulePayload) -> Result<LecturerModule, AppError> {
        Self::send_json(self.authorized(Method::POST, "/api/modules")?, payload).await
    }

    pub async fn update_module(
        &self,
        module_id: Uuid,
        payload: &UpdateModulePayload,
    ) -> Result<LecturerModule, AppError> {
        let path = format!("/api/modules/{module_id}");
        Self::send_json(self.authorized(Method::PATCH, &path)?, payload).await
    }

    pub async fn set_module_active(&self, module_id: Uuid, is_active: bool) -> Result<LecturerModule, AppError> {
        let path = format!("/api/modules/{module_id}/active");
        Self::send_json(self.authorized(Method::PATCH, &path)?, &SetActivePayload { is_active }).await
    }

    pub async fn delete_module(&self, module_id: Uuid) -> Result<(), AppError> {
        let path = format!("/api/modules/{module_id}");
        let response = self.authorized(Method::DELETE, &path)?.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AppError::from_status(status, body))
        }
    }

    pub async fn list_ratings(&self, module_id: Option<Uuid>) -> Result<Vec<Rating>, AppError> {
        let mut request = self.request(Method::GET, "/api/ratings");
        if let Some(module_id) = module_id {
            request = request.query(&[("lecturerModuleId", module_id.to_string())]);
        }
        Self::send(request).await
    }

    pub async fn submit_rating(&self, payload: &RatingPayload) -> Result<Rating, AppError> {
        Self::send_json(self.request(Method::POST, "/api/ratings"), payload).await
    }

    pub async fn reports(&self) -> Result<Vec<ModuleReport>, AppError> {
        Self::send(self.authorized(Method::GET, "/api/reports")?).await
    }

    pub async fn report(&self, module_id: Uuid) -> Result<ModuleReport, AppError> {
        let path = format!("/api/reports/{module_id}");
        Self::send(self.authorized(Method::GET, &path)?).await
    }

    /// Builds a report on this side from the raw lists.
    pub async fn build_report_locally(&self, module_id: Uuid) -> Result<ModuleReport, AppError> {
        let module = self
            .list_all_modules()
            .await?
            .into_iter()
            .find(|m| m.id == module_id)
            .ok_or_else(|| AppError::NotFound(format!("Module with ID {} not found", module_id)))?;

        let ratings = self.list_ratings(Some(module_id)).await?;
        Ok(build_report(&module, &ratings))
    }

    pub async fn export_report(&self, module_id: Uuid) -> Result<CsvExport, AppError> {
        let report = self.build_report_locally(module_id).await?;
        Ok(export_csv(&report))
    }
}
