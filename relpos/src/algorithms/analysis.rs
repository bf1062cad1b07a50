//! Report rows and summary statistics over the matched offsets of a run.

use qtty::Degrees;
use serde::{Deserialize, Serialize};

use crate::core::context::RunContext;
use crate::core::domain::MatchedPair;

/// Maps `x` into `(-180, 180]` with at most one full-turn correction.
///
/// # Examples
///
/// ```
/// use relpos::algorithms::analysis::wrap180;
/// use qtty::Degrees;
///
/// assert_eq!(wrap180(Degrees::new(190.0)).value(), -170.0);
/// assert_eq!(wrap180(Degrees::new(-180.0)).value(), 180.0);
/// assert_eq!(wrap180(Degrees::new(180.0)).value(), 180.0);
/// assert_eq!(wrap180(Degrees::new(-90.0)).value(), -90.0);
/// ```
pub fn wrap180(x: Degrees) -> Degrees {
    let v = x.value();
    if v > 180.0 {
        Degrees::new(v - 360.0)
    } else if v <= -180.0 {
        Degrees::new(v + 360.0)
    } else {
        x
    }
}

/// Next value of a continuous rotation sequence.
///
/// `raw` is shifted by a full turn when it jumps more than half a turn away
/// from the previously accepted value.
///
/// # Examples
///
/// ```
/// use relpos::algorithms::analysis::unwrap_step;
/// use qtty::Degrees;
///
/// assert_eq!(unwrap_step(Degrees::new(179.0), Degrees::new(-179.0)).value(), 181.0);
/// assert_eq!(unwrap_step(Degrees::new(1.0), Degrees::new(359.0)).value(), -1.0);
/// assert_eq!(unwrap_step(Degrees::new(10.0), Degrees::new(20.0)).value(), 20.0);
/// ```
pub fn unwrap_step(previous: Degrees, raw: Degrees) -> Degrees {
    let diff = raw.value() - previous.value();
    if diff > 180.0 {
        Degrees::new(raw.value() - 360.0)
    } else if diff < -180.0 {
        Degrees::new(raw.value() + 360.0)
    } else {
        raw
    }
}

/// Unwraps a rotation sequence, seeded with its first value.
pub fn unwrap_rotations<I>(raw: I) -> Vec<Degrees>
where
    I: IntoIterator<Item = Degrees>,
{
    raw.into_iter()
        .scan(None, |previous: &mut Option<Degrees>, r| {
            let next = match *previous {
                Some(p) => unwrap_step(p, r),
                None => r,
            };
            *previous = Some(next);
            Some(next)
        })
        .collect()
}

/// Min/max/mean and population standard deviation of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub stdev: f64,
}

impl Summary {
    /// `None` for an empty sample.
    ///
    /// The deviation divides by `n`, not `n - 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use relpos::algorithms::analysis::Summary;
    ///
    /// let s = Summary::from_values(&[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(s.mean, 2.0);
    /// assert!((s.stdev - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    /// assert!(Summary::from_values(&[]).is_none());
    /// ```
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let (mut min, mut max, mut sum, mut sum_sq) = (f64::MAX, f64::MIN, 0.0, 0.0);
        for &v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            sum_sq += v * v;
        }

        let mean = sum / n;
        // Rounding can push a zero variance slightly negative.
        let variance = ((sum_sq - sum * mean) / n).max(0.0);

        Some(Self {
            min,
            max,
            mean,
            stdev: variance.sqrt(),
        })
    }
}

/// Statistics block of a run.
///
/// `rotation` is computed on the unwrapped sequence, so its min/max/mean may
/// lie outside `[0, 360)`; use [`RunStatistics::rotation_for_display`] when
/// printing. `tilt` uses the raw values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub count: usize,
    pub rotation: Summary,
    pub tilt: Summary,
}

impl RunStatistics {
    /// `None` when there are no matches.
    pub fn compute(pairs: &[MatchedPair]) -> Option<Self> {
        let rotations: Vec<f64> = unwrap_rotations(pairs.iter().map(|p| p.rotation))
            .into_iter()
            .map(|r| r.value())
            .collect();
        let tilts: Vec<f64> = pairs.iter().map(|p| p.tilt.value()).collect();

        Some(Self {
            count: pairs.len(),
            rotation: Summary::from_values(&rotations)?,
            tilt: Summary::from_values(&tilts)?,
        })
    }

    /// Rotation min/mean/max wrapped back into `[0, 360)`.
    pub fn rotation_for_display(&self) -> Summary {
        let wrap = |v: f64| Degrees::new(v).wrap_pos().value();
        Summary {
            min: wrap(self.rotation.min),
            max: wrap(self.rotation.max),
            mean: wrap(self.rotation.mean),
            stdev: self.rotation.stdev,
        }
    }
}

/// One output row: both boresights, the offset and the offset relative to
/// the configured base values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub ra: f64,
    pub dec: f64,
    pub file_name: String,
    pub ra0: f64,
    pub dec0: f64,
    pub file_name0: String,
    pub rotation: f64,
    pub tilt: f64,
    pub relative_rotation: f64,
    pub relative_tilt: f64,
}

/// Turns the matched offsets of a run into report rows and statistics.
#[derive(Debug, Clone, Copy)]
pub struct ResultAggregator {
    base_rotation: Degrees,
    base_tilt: Degrees,
}

impl ResultAggregator {
    pub fn new(base_rotation: Degrees, base_tilt: Degrees) -> Self {
        Self {
            base_rotation,
            base_tilt,
        }
    }

    pub fn from_context(ctx: &RunContext) -> Self {
        Self::new(ctx.base_rotation, ctx.base_tilt)
    }

    pub fn row(&self, pair: &MatchedPair) -> ReportRow {
        let relative_rotation =
            wrap180(Degrees::new(self.base_rotation.value() - pair.rotation.value()));
        ReportRow {
            ra: pair.follower.ra().value(),
            dec: pair.follower.dec().value(),
            file_name: pair.follower_label.clone(),
            ra0: pair.reference.ra().value(),
            dec0: pair.reference.dec().value(),
            file_name0: pair.reference_label.clone(),
            rotation: pair.rotation.value(),
            tilt: pair.tilt.value(),
            relative_rotation: relative_rotation.value(),
            relative_tilt: self.base_tilt.value() - pair.tilt.value(),
        }
    }

    /// Rows in match order.
    pub fn rows(&self, pairs: &[MatchedPair]) -> Vec<ReportRow> {
        pairs.iter().map(|p| self.row(p)).collect()
    }

    pub fn statistics(&self, pairs: &[MatchedPair]) -> Option<RunStatistics> {
        RunStatistics::compute(pairs)
    }
}
