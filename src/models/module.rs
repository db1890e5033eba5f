use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LecturerModule {
    pub id: Uuid,
    pub lecturer_name: String,
    pub module_name: String,
    pub module_description: String,
    pub module_objectives: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateModulePayload {
    pub lecturer_name: Option<String>,
    pub module_name: Option<String>,
    pub module_description: Option<String>,
    pub module_objectives: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

/// A validated module, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewModule {
    pub lecturer_name: String,
    pub module_name: String,
    pub module_description: String,
    pub module_objectives: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
}

impl CreateModulePayload {
    pub fn validate(self) -> Result<NewModule, AppError> {
        let lecturer_name = non_blank(self.lecturer_name);
        let module_name = non_blank(self.module_name);
        let module_description = non_blank(self.module_description);

        let (Some(lecturer_name), Some(module_name), Some(module_description)) =
            (lecturer_name, module_name, module_description)
        else {
            return Err(AppError::BadRequest(
                "Lecturer name, module name, and description are required".into(),
            ));
        };

        let email = non_blank(self.email);
        if let Some(email) = &email {
            validate_email(email)?;
        }

        Ok(NewModule {
            lecturer_name,
            module_name,
            module_description,
            module_objectives: non_blank(self.module_objectives),
            email,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Field edits from an administrator. Absent fields stay untouched; an empty
/// string clears an optional field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateModulePayload {
    pub lecturer_name: Option<String>,
    pub module_name: Option<String>,
    pub module_description: Option<String>,
    pub module_objectives: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateModulePayload {
    pub fn is_empty(&self) -> bool {
        self.lecturer_name.is_none()
            && self.module_name.is_none()
            && self.module_description.is_none()
            && self.module_objectives.is_none()
            && self.email.is_none()
            && self.is_active.is_none()
    }

    /// Applies the edits on top of `current`, enforcing the same rules as creation.
    pub fn apply_to(self, current: &LecturerModule) -> Result<NewModule, AppError> {
        if self.is_empty() {
            return Err(AppError::BadRequest("No fields to update".into()));
        }

        CreateModulePayload {
            lecturer_name: Some(
                self.lecturer_name
                    .unwrap_or_else(|| current.lecturer_name.clone()),
            ),
            module_name: Some(
                self.module_name
                    .unwrap_or_else(|| current.module_name.clone()),
            ),
            module_description: Some(
                self.module_description
                    .unwrap_or_else(|| current.module_description.clone()),
            ),
            module_objectives: self
                .module_objectives
                .or_else(|| current.module_objectives.clone()),
            email: self.email.or_else(|| current.email.clone()),
            is_active: Some(self.is_active.unwrap_or(current.is_active)),
        }
        .validate()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActivePayload {
    pub is_active: bool,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if valid && !email.chars().any(char::is_whitespace) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("Invalid email address: {email}")))
    }
}
