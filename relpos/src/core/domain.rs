//! Domain models for time-tagged pointing records and matched offsets.
//!
//! This module provides the core data structures shared by every stage of a
//! run: single pointing records, the per-camera sequences they are grouped
//! into, and the offset records produced by matching a follower record with
//! its nearest reference record.

use std::fmt;

use qtty::{Degrees, Seconds};
use serde::{Deserialize, Serialize};

/// Optical axis direction of a field of view in equatorial coordinates.
///
/// # Examples
///
/// ```
/// use relpos::core::domain::Boresight;
/// use qtty::Degrees;
///
/// let axis = Boresight::new(Degrees::new(10.0), Degrees::new(20.0));
/// assert_eq!(axis.ra().value(), 10.0);
/// assert_eq!(axis.dec().value(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boresight {
    ra: Degrees,
    dec: Degrees,
}

impl Boresight {
    pub fn new(ra: Degrees, dec: Degrees) -> Self {
        Self { ra, dec }
    }

    pub fn ra(&self) -> Degrees {
        self.ra
    }

    pub fn dec(&self) -> Degrees {
        self.dec
    }
}

/// Wall-clock time of an exposure with hundredths-of-second resolution.
///
/// `centis` holds seconds and hundredths together (`ss * 100 + ff`), the way
/// the timestamp is written in image labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
    pub centis: u16,
}

impl ClockTime {
    /// Creates a clock time, returning `None` when a field is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use relpos::core::domain::ClockTime;
    ///
    /// assert!(ClockTime::new(12, 0, 5999).is_some());
    /// assert!(ClockTime::new(24, 0, 0).is_none());
    /// assert!(ClockTime::new(12, 60, 0).is_none());
    /// assert!(ClockTime::new(12, 0, 6000).is_none());
    /// ```
    pub fn new(hour: u8, minute: u8, centis: u16) -> Option<Self> {
        if hour < 24 && minute < 60 && centis < 6000 {
            Some(Self {
                hour,
                minute,
                centis,
            })
        } else {
            None
        }
    }

    /// Seconds elapsed since midnight.
    ///
    /// # Examples
    ///
    /// ```
    /// use relpos::core::domain::ClockTime;
    ///
    /// let t = ClockTime::new(12, 0, 150).unwrap();
    /// assert_eq!(t.seconds_of_day().value(), 43201.5);
    /// ```
    pub fn seconds_of_day(&self) -> Seconds {
        let whole = (self.hour as f64 * 60.0 + self.minute as f64) * 60.0;
        Seconds::new(whole + self.centis as f64 * 0.01)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:02}",
            self.hour,
            self.minute,
            self.centis / 100,
            self.centis % 100
        )
    }
}

/// One sky-pointing record.
///
/// `calendar_date` is the `YYMMDD` key taken from the image label. It only
/// takes part in same-day checks; all time arithmetic uses `time_of_day`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub boresight: Boresight,
    pub calendar_date: u32,
    pub clock: ClockTime,
    pub time_of_day: Seconds,
    pub source_label: String,
}

impl Observation {
    pub fn new(
        boresight: Boresight,
        calendar_date: u32,
        clock: ClockTime,
        source_label: impl Into<String>,
    ) -> Self {
        Self {
            boresight,
            calendar_date,
            clock,
            time_of_day: clock.seconds_of_day(),
            source_label: source_label.into(),
        }
    }
}

/// Which side of the measurement a camera sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraRole {
    /// Wide field (FFoV), the angular reference.
    Reference,
    /// Narrow field (JFoV) whose offset is measured.
    Follower,
}

impl fmt::Display for CameraRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraRole::Reference => write!(f, "FFoV"),
            CameraRole::Follower => write!(f, "JFoV"),
        }
    }
}

/// Ordered records of one camera.
///
/// Records are expected in non-decreasing `time_of_day` order; the matcher
/// relies on it and does not re-sort.
///
/// # Examples
///
/// ```
/// use relpos::core::domain::ObservationSet;
///
/// let set = ObservationSet::new("005");
/// assert!(!set.is_valid());
/// assert_eq!(set.len(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSet {
    pub camera_id: String,
    pub observations: Vec<Observation>,
}

impl ObservationSet {
    pub fn new(camera_id: impl Into<String>) -> Self {
        Self {
            camera_id: camera_id.into(),
            observations: Vec::new(),
        }
    }

    pub fn with_observations(camera_id: impl Into<String>, observations: Vec<Observation>) -> Self {
        Self {
            camera_id: camera_id.into(),
            observations,
        }
    }

    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    /// A set is usable only when it holds at least one record.
    pub fn is_valid(&self) -> bool {
        !self.observations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Time of the first and last record, or `None` for an empty set.
    pub fn time_span(&self) -> Option<(Seconds, Seconds)> {
        Some((self.first()?.time_of_day, self.last()?.time_of_day))
    }
}

/// Offset of the follower axis expressed in the reference-centered frame.
///
/// Holds copies of both records' positions and labels, so a result sequence
/// outlives the sets it was computed from.
///
/// * `rotation` - azimuth about the reference boresight, `[0, 360)` degrees
/// * `tilt` - angular distance from the reference boresight, 0 when coincident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPair {
    pub follower: Boresight,
    pub follower_label: String,
    pub reference: Boresight,
    pub reference_label: String,
    pub rotation: Degrees,
    pub tilt: Degrees,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn observation(hour: u8, minute: u8, centis: u16) -> Observation {
        Observation::new(
            Boresight::new(Degrees::new(10.0), Degrees::new(20.0)),
            171028,
            ClockTime::new(hour, minute, centis).unwrap(),
            "G005_mon_objt_171028T12000000.fit",
        )
    }

    #[test]
    fn test_time_of_day_from_clock() {
        let obs = observation(1, 2, 305);
        assert_relative_eq!(obs.time_of_day.value(), 3723.05, epsilon = 1e-9);
    }

    #[test]
    fn test_clock_display() {
        let t = ClockTime::new(7, 5, 912).unwrap();
        assert_eq!(t.to_string(), "07:05:09.12");
    }

    #[test]
    fn test_observation_set_validity_and_span() {
        let mut set = ObservationSet::new("001");
        assert!(!set.is_valid());
        assert!(set.time_span().is_none());

        set.push(observation(12, 0, 0));
        set.push(observation(12, 1, 0));
        assert!(set.is_valid());
        assert_eq!(set.len(), 2);

        let (start, stop) = set.time_span().unwrap();
        assert_eq!(start.value(), 43200.0);
        assert_eq!(stop.value(), 43260.0);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(CameraRole::Reference.to_string(), "FFoV");
        assert_eq!(CameraRole::Follower.to_string(), "JFoV");
    }
}
