//! Time validity checks run before matching.
//!
//! Matching works on seconds since midnight, so each set must stay within one
//! calendar date, and the reference and follower sets must describe the same
//! night. Time ranges that cross a UTC midnight are not supported.

use qtty::Seconds;
use serde::{Deserialize, Serialize};

use crate::core::context::OverlapPolicy;
use crate::core::domain::ObservationSet;
use crate::core::error::{RelposError, Result};

/// Validation outcome with categorized issues and statistics.
///
/// Errors make `is_valid` false; warnings are informational.
///
/// # Examples
///
/// ```
/// use relpos::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid);
///
/// result.add_error("JFoV spans 2 calendar dates".to_string());
/// assert!(!result.is_valid);
/// assert!(result.into_result().is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary of the two sets seen by the validator.
///
/// * `reference_points` / `follower_points` - record counts
/// * `reference_dates` / `follower_dates` - distinct calendar dates in each set
/// * `unordered_records` - records whose time precedes their predecessor's
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationStats {
    pub reference_points: usize,
    pub follower_points: usize,
    pub reference_dates: usize,
    pub follower_dates: usize,
    pub unordered_records: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds a critical error and marks the result as invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Collapse into a [`RelposError::TemporalInconsistency`] when invalid.
    pub fn into_result(self) -> Result<ValidationStats> {
        if self.is_valid {
            Ok(self.stats)
        } else {
            Err(RelposError::TemporalInconsistency(self.errors.join("; ")))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for the time coverage of a reference/follower pair.
pub struct TemporalValidator;

impl TemporalValidator {
    /// `true` when every record of `set` shares one calendar date.
    ///
    /// An empty set is trivially consistent.
    pub fn is_temporally_consistent(set: &ObservationSet) -> bool {
        match set.first() {
            Some(first) => set
                .observations
                .iter()
                .all(|o| o.calendar_date == first.calendar_date),
            None => true,
        }
    }

    /// Coarse overlap check: the first records of both sets carry the same
    /// calendar date.
    pub fn date_ranges_overlap(a: &ObservationSet, b: &ObservationSet) -> bool {
        match (a.first(), b.first()) {
            (Some(x), Some(y)) => x.calendar_date == y.calendar_date,
            _ => false,
        }
    }

    /// Interval check: the follower span widened by `tolerance` on both ends
    /// intersects the reference span.
    ///
    /// Single-record sets are spans of zero width.
    pub fn time_ranges_overlap(
        reference: &ObservationSet,
        follower: &ObservationSet,
        tolerance: Seconds,
    ) -> bool {
        match (reference.time_span(), follower.time_span()) {
            (Some((ref_start, ref_stop)), Some((fol_start, fol_stop))) => {
                fol_start.value() - tolerance.value() <= ref_stop.value()
                    && fol_stop.value() + tolerance.value() >= ref_start.value()
            }
            _ => false,
        }
    }

    /// Runs every check required by `policy`.
    ///
    /// # Examples
    ///
    /// ```
    /// use relpos::core::context::OverlapPolicy;
    /// use relpos::core::domain::{Boresight, ClockTime, Observation, ObservationSet};
    /// use relpos::preprocessing::validator::TemporalValidator;
    /// use qtty::{Degrees, Seconds};
    ///
    /// let obs = |date, hour| Observation::new(
    ///     Boresight::new(Degrees::new(0.0), Degrees::new(0.0)),
    ///     date,
    ///     ClockTime::new(hour, 0, 0).unwrap(),
    ///     "label",
    /// );
    /// let reference = ObservationSet::with_observations("005", vec![obs(171028, 12)]);
    /// let follower = ObservationSet::with_observations("001", vec![obs(171029, 12)]);
    ///
    /// let result = TemporalValidator::validate(
    ///     &reference, &follower, OverlapPolicy::SameDate, Seconds::new(10.0));
    /// assert!(!result.is_valid);
    /// ```
    pub fn validate(
        reference: &ObservationSet,
        follower: &ObservationSet,
        policy: OverlapPolicy,
        tolerance: Seconds,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.stats.reference_points = reference.len();
        result.stats.follower_points = follower.len();
        result.stats.reference_dates = distinct_dates(reference);
        result.stats.follower_dates = distinct_dates(follower);
        result.stats.unordered_records = unordered_records(reference) + unordered_records(follower);

        if result.stats.unordered_records > 0 {
            result.add_warning(format!(
                "{} records are out of time order; matching assumes ascending time",
                result.stats.unordered_records
            ));
        }

        if !Self::is_temporally_consistent(follower) {
            result.add_error(format!(
                "JFoV camera <{}> spans {} calendar dates",
                follower.camera_id, result.stats.follower_dates
            ));
        }
        if !Self::is_temporally_consistent(reference) {
            result.add_error(format!(
                "FFoV camera <{}> spans {} calendar dates",
                reference.camera_id, result.stats.reference_dates
            ));
        }
        if !Self::date_ranges_overlap(reference, follower) {
            result.add_error(format!(
                "FFoV <{}> and JFoV <{}> start on different dates",
                reference.camera_id, follower.camera_id
            ));
        }

        if policy == OverlapPolicy::Interval
            && !Self::time_ranges_overlap(reference, follower, tolerance)
        {
            result.add_error(format!(
                "JFoV <{}> time range does not intersect FFoV <{}> within {} s",
                follower.camera_id,
                reference.camera_id,
                tolerance.value()
            ));
        }

        result
    }
}

fn distinct_dates(set: &ObservationSet) -> usize {
    let mut dates: Vec<u32> = set.observations.iter().map(|o| o.calendar_date).collect();
    dates.sort_unstable();
    dates.dedup();
    dates.len()
}

fn unordered_records(set: &ObservationSet) -> usize {
    set.observations
        .windows(2)
        .filter(|w| w[1].time_of_day.value() < w[0].time_of_day.value())
        .count()
}
