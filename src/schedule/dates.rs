//! Randomized due-date projection.
//!
//! A successful review pushes the next due date out by the previous gap
//! times `recall_factor`, jittered by a uniform offset and clamped to
//! `[1, recall_max]` days. The result is therefore always strictly in
//! the future.
//!
//! Fractional products round half away from zero (`f64::round`). Prior
//! data produced under a floor policy will not reproduce bit-exact
//! dates.

use chrono::{Duration, NaiveDate};

use crate::core::TrainRng;

/// Project the next due date for a recalled item.
///
/// `recall_max` must be at least 1.
pub fn project_due_date(
    today: NaiveDate,
    last_study: NaiveDate,
    current_due: NaiveDate,
    recall_factor: f64,
    recall_radius: i64,
    recall_max: i64,
    rng: &mut TrainRng,
) -> NaiveDate {
    let gap = (current_due - last_study).num_days();
    let base = (gap as f64 * recall_factor).round() as i64;
    let offset = rng.offset(recall_radius);
    let clamped = (base + offset).clamp(1, recall_max);
    today + Duration::days(clamped)
}
