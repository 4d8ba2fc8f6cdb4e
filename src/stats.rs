//! Lead-time averaging over start/end timestamp pairs.
//!
//! Both the work-item and task trackers reduce their records to
//! [`LeadSample`] pairs and compute the mean here, so the empty-set guard
//! lives in exactly one place.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// One completed unit of work contributing to a lead-time average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadSample {
    /// When the unit of work was started.
    pub start: DateTime<Utc>,
    /// When the unit of work reached the measured end point.
    pub end: DateTime<Utc>,
}

/// Errors returned by lead-time aggregation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LeadTimeError {
    /// The mean of an empty sample set is undefined.
    #[error("average lead time is undefined over an empty sample set")]
    UndefinedAverage,
}

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Computes the mean lead time in minutes across the samples.
///
/// # Errors
///
/// Returns [`LeadTimeError::UndefinedAverage`] when `samples` is empty. An
/// empty set must surface as a typed failure rather than a silent NaN.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "lead-time averages are reporting values; sub-millisecond precision loss is acceptable"
)]
pub fn average_minutes(samples: &[LeadSample]) -> Result<f64, LeadTimeError> {
    if samples.is_empty() {
        return Err(LeadTimeError::UndefinedAverage);
    }

    let total_minutes: f64 = samples
        .iter()
        .map(|sample| (sample.end - sample.start).num_milliseconds() as f64 / MILLIS_PER_MINUTE)
        .sum();
    Ok(total_minutes / samples.len() as f64)
}
