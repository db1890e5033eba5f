use serde::{Deserialize, Serialize};

use crate::models::{LecturerModule, Rating, rating::Criterion};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Averages {
    /// Per-criterion means, indexed like `Criterion::ALL`.
    pub criteria: [f64; 5],
    /// Mean of the five per-criterion means.
    pub overall: f64,
}

impl Averages {
    pub fn criterion(&self, criterion: Criterion) -> f64 {
        self.criteria[criterion.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleReport {
    pub module: LecturerModule,
    /// Most recent first.
    pub ratings: Vec<Rating>,
    pub averages: Averages,
    #[serde(rename = "totalRatings")]
    pub total_ratings: usize,
}
