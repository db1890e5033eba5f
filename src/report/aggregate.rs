use uuid::Uuid;

use crate::models::{Averages, LecturerModule, ModuleReport, Rating};

/// Per-criterion and overall means for one module.
///
/// Only ratings whose `lecturer_module_id` equals `module_id` are counted, so
/// an unfiltered ratings list can be passed straight in. Sums are taken over
/// integers, which keeps the result identical for any ordering of `ratings`.
/// With no matching ratings every average is `0.0`; real scores are never
/// below 1, so zero always means "no data yet".
pub fn aggregate(module_id: Uuid, ratings: &[Rating]) -> Averages {
    let mut sums = [0i64; 5];
    let mut count = 0u32;

    for rating in ratings.iter().filter(|r| r.lecturer_module_id == module_id) {
        for (sum, score) in sums.iter_mut().zip(rating.scores()) {
            *sum += i64::from(score);
        }
        count += 1;
    }

    if count == 0 {
        return Averages::default();
    }

    let criteria = sums.map(|sum| sum as f64 / f64::from(count));
    let overall = criteria.iter().sum::<f64>() / criteria.len() as f64;

    Averages { criteria, overall }
}

/// Aggregates a module and orders its ratings most recent first.
pub fn build_report(module: &LecturerModule, ratings: &[Rating]) -> ModuleReport {
    let averages = aggregate(module.id, ratings);

    let mut module_ratings: Vec<Rating> = ratings
        .iter()
        .filter(|r| r.lecturer_module_id == module.id)
        .cloned()
        .collect();
    module_ratings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

    ModuleReport {
        module: module.clone(),
        total_ratings: module_ratings.len(),
        ratings: module_ratings,
        averages,
    }
}

pub fn build_reports(modules: &[LecturerModule], ratings: &[Rating]) -> Vec<ModuleReport> {
    modules
        .iter()
        .map(|module| build_report(module, ratings))
        .collect()
}

/// Rounds half away from zero at `places` decimals.
///
/// Averages are never negative, so this is round-half-up for every value the
/// engine produces. The epsilon absorbs binary representation error such as
/// `3.65` being stored as `3.6499999...`.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let scaled = value.abs() * factor;
    let rounded = (scaled + 0.5 + 1e-9).floor() / factor;
    rounded.copysign(value)
}

/// One-decimal rendering used for on-screen summaries.
pub fn format_summary(value: f64) -> String {
    format!("{:.1}", round_half_up(value, 1))
}

/// Two-decimal rendering used in CSV exports.
pub fn format_export(value: f64) -> String {
    format!("{:.2}", round_half_up(value, 2))
}
