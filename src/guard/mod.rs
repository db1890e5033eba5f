//! Per-client duplicate-submission check for the rating flow.
//!
//! The guard is advisory. It only sees the record of the client it runs in,
//! so clearing that record or switching devices gets past it, and the server
//! accepts any well-formed rating for an active module without identity
//! checks. Treat it as a UX nicety, not an integrity guarantee.

pub mod redis_store;
pub mod store;

use uuid::Uuid;

pub use redis_store::RedisPreferenceStore;
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

pub const ALREADY_RATED_NOTICE: &str = "You have already rated this module from this device.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Permit,
    AlreadyRated,
}

impl GuardDecision {
    pub fn is_permitted(self) -> bool {
        self == GuardDecision::Permit
    }
}

pub struct SubmissionGuard<S> {
    store: S,
}

impl<S: PreferenceStore> SubmissionGuard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fails open: an unreadable record counts as "not yet rated".
    pub async fn check(&self, module_id: Uuid) -> GuardDecision {
        match self.store.rated_modules().await {
            Ok(rated) if rated.contains(&module_id) => GuardDecision::AlreadyRated,
            Ok(_) => GuardDecision::Permit,
            Err(e) => {
                tracing::warn!(
                    "Could not read rated modules, allowing module {}: {}",
                    module_id,
                    e
                );
                GuardDecision::Permit
            }
        }
    }

    /// Best-effort: the rating is already stored server-side, so a failed
    /// write is logged and swallowed. Returns whether the write landed.
    pub async fn record(&self, module_id: Uuid) -> bool {
        match self.store.record_rated(module_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Could not record module {} as rated: {}", module_id, e);
                false
            }
        }
    }

    pub async fn clear(&self) -> Result<(), crate::errors::AppError> {
        self.store.clear().await
    }
}
