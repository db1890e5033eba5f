use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

pub const MIN_SCORE: i16 = 1;
pub const MAX_SCORE: i16 = 5;
pub const REMARKS_MAX_CHARS: usize = 500;

/// The five fixed evaluation dimensions, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Relevance,
    ContentQuality,
    VisualAids,
    Style,
    Overall,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::Relevance,
        Criterion::ContentQuality,
        Criterion::VisualAids,
        Criterion::Style,
        Criterion::Overall,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Criterion::Relevance => "Relevance of the topic to the module objectives",
            Criterion::ContentQuality => "Content and quality of the lecturer",
            Criterion::VisualAids => "Use of visual aids and other means of instruction",
            Criterion::Style => "Style of lecturer",
            Criterion::Overall => "Overall assessment of lecturer",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Criterion::Relevance => 0,
            Criterion::ContentQuality => 1,
            Criterion::VisualAids => 2,
            Criterion::Style => 3,
            Criterion::Overall => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Rating {
    pub id: Uuid,
    pub lecturer_module_id: Uuid,
    pub criteria_1_score: i16,
    pub criteria_2_score: i16,
    pub criteria_3_score: i16,
    pub criteria_4_score: i16,
    pub criteria_5_score: i16,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,

    // Audit-only; never leaves the server
    #[serde(skip)]
    pub ip_address: Option<String>,
    #[serde(skip)]
    pub user_agent: Option<String>,
}

impl Rating {
    pub fn scores(&self) -> [i16; 5] {
        [
            self.criteria_1_score,
            self.criteria_2_score,
            self.criteria_3_score,
            self.criteria_4_score,
            self.criteria_5_score,
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingPayload {
    pub lecturer_module_id: Option<Uuid>,
    pub criteria_1_score: Option<i64>,
    pub criteria_2_score: Option<i64>,
    pub criteria_3_score: Option<i64>,
    pub criteria_4_score: Option<i64>,
    pub criteria_5_score: Option<i64>,
    pub remarks: Option<String>,
}

impl RatingPayload {
    pub fn new(module_id: Uuid, scores: [i64; 5], remarks: Option<String>) -> Self {
        Self {
            lecturer_module_id: Some(module_id),
            criteria_1_score: Some(scores[0]),
            criteria_2_score: Some(scores[1]),
            criteria_3_score: Some(scores[2]),
            criteria_4_score: Some(scores[3]),
            criteria_5_score: Some(scores[4]),
            remarks,
        }
    }

    /// Checks every field before anything is persisted.
    pub fn validate(self) -> Result<NewRating, AppError> {
        let lecturer_module_id = self
            .lecturer_module_id
            .ok_or_else(|| AppError::BadRequest("Lecturer module ID is required".into()))?;

        let raw = [
            self.criteria_1_score,
            self.criteria_2_score,
            self.criteria_3_score,
            self.criteria_4_score,
            self.criteria_5_score,
        ];

        let mut scores = [0i16; 5];
        for (criterion, (slot, value)) in Criterion::ALL.iter().zip(scores.iter_mut().zip(raw)) {
            let value = value.ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Please rate all criteria: '{}' is missing",
                    criterion.label()
                ))
            })?;
            if !(i64::from(MIN_SCORE)..=i64::from(MAX_SCORE)).contains(&value) {
                return Err(AppError::BadRequest(format!(
                    "Score for '{}' must be between {MIN_SCORE} and {MAX_SCORE}, got {value}",
                    criterion.label()
                )));
            }
            *slot = value as i16;
        }

        let remarks = self
            .remarks
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        if let Some(remarks) = &remarks {
            let len = remarks.chars().count();
            if len > REMARKS_MAX_CHARS {
                return Err(AppError::BadRequest(format!(
                    "Remarks must be at most {REMARKS_MAX_CHARS} characters, got {len}"
                )));
            }
        }

        Ok(NewRating {
            lecturer_module_id,
            scores,
            remarks,
        })
    }
}

/// A rating that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRating {
    pub lecturer_module_id: Uuid,
    pub scores: [i16; 5],
    pub remarks: Option<String>,
}

/// Where a submission came from, kept for abuse auditing.
#[derive(Debug, Clone, Default)]
pub struct SubmissionMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Query string of the ratings listing (`?lecturerModuleId=`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingFilter {
    pub lecturer_module_id: Option<Uuid>,
}
