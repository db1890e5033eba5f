use uuid::Uuid;

use crate::{
    client::AssessClient,
    errors::AppError,
    guard::{ALREADY_RATED_NOTICE, GuardDecision, PreferenceStore, SubmissionGuard},
    models::{LecturerModule, Rating, rating::RatingPayload},
    report::{aggregate, format_summary},
};

pub const INACTIVE_MODULE_NOTICE: &str = "This module is not accepting ratings.";

/// One row of the rater-facing module list.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalEntry {
    pub module: LecturerModule,
    pub total_ratings: usize,
    pub overall_average: f64,
    pub already_rated: bool,
}

impl PortalEntry {
    /// `None` when the module has no ratings yet.
    pub fn summary(&self) -> Option<String> {
        (self.total_ratings > 0).then(|| format_summary(self.overall_average))
    }
}

/// An opened rating form. Only `RatingPortal::open_form` hands these out, so
/// holding one means the guard already let it through.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingForm {
    module: LecturerModule,
}

impl RatingForm {
    pub fn module(&self) -> &LecturerModule {
        &self.module
    }

    pub fn module_id(&self) -> Uuid {
        self.module.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormGate {
    Open(RatingForm),
    Refused { notice: String },
}

pub struct RatingPortal<S> {
    client: AssessClient,
    guard: SubmissionGuard<S>,
}

impl<S: PreferenceStore> RatingPortal<S> {
    pub fn new(client: AssessClient, store: S) -> Self {
        Self {
            client,
            guard: SubmissionGuard::new(store),
        }
    }

    pub fn guard(&self) -> &SubmissionGuard<S> {
        &self.guard
    }

    /// Active modules with their overall average and whether this client has
    /// rated them already.
    pub async fn listing(&self) -> Result<Vec<PortalEntry>, AppError> {
        let modules = self.client.list_active_modules().await?;
        let ratings = self.client.list_ratings(None).await?;

        let mut entries = Vec::with_capacity(modules.len());
        for module in modules {
            let total_ratings = ratings
                .iter()
                .filter(|r| r.lecturer_module_id == module.id)
                .count();
            let overall_average = aggregate(module.id, &ratings).overall;
            let already_rated = self.guard.check(module.id).await == GuardDecision::AlreadyRated;

            entries.push(PortalEntry {
                module,
                total_ratings,
                overall_average,
                already_rated,
            });
        }

        Ok(entries)
    }

    pub async fn open_form(&self, module: &LecturerModule) -> FormGate {
        if !module.is_active {
            return FormGate::Refused {
                notice: INACTIVE_MODULE_NOTICE.to_string(),
            };
        }

        match self.guard.check(module.id).await {
            GuardDecision::Permit => FormGate::Open(RatingForm {
                module: module.clone(),
            }),
            GuardDecision::AlreadyRated => FormGate::Refused {
                notice: ALREADY_RATED_NOTICE.to_string(),
            },
        }
    }

    /// Validates locally, submits, then records the module as rated. A failed
    /// local write does not fail the submission.
    pub async fn submit(
        &self,
        form: RatingForm,
        scores: [i64; 5],
        remarks: Option<String>,
    ) -> Result<Rating, AppError> {
        let payload = RatingPayload::new(form.module_id(), scores, remarks);

        // Reject bad input before it leaves the client
        payload.clone().validate()?;

        let rating = self.client.submit_rating(&payload).await?;

        if !self.guard.record(form.module_id()).await {
            tracing::warn!(
                "Rating {} stored but module {} was not remembered locally",
                rating.id,
                form.module_id()
            );
        }

        Ok(rating)
    }
}
