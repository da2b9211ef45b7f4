//! "Rate in effect on a date" lookup.
//!
//! `RateSeries` guarantees ascending dates, so the latest observation at or
//! before a target is found with a binary search instead of a linear scan
//! that would silently stop early on unsorted input.

use chrono::NaiveDate;

use crate::domain::RateSeries;

/// Value of the latest observation dated on or before `target`.
///
/// Returns `None` when the series is empty or every observation is after
/// `target`. With duplicate dates the last one wins.
pub fn rate_at_or_before(series: &RateSeries, target: NaiveDate) -> Option<f64> {
    let obs = series.observations();
    let after = obs.partition_point(|o| o.date <= target);
    after.checked_sub(1).map(|idx| obs[idx].value)
}
