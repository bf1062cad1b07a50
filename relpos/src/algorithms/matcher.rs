//! Nearest-in-time matching of follower records against reference records.
//!
//! Both sequences are ascending in time, so the search for each follower
//! record resumes at the reference index matched for the previous one and
//! walks forward only while the time difference keeps shrinking. A whole
//! matching pass is linear in the combined length of the two sequences.

use log::debug;
use qtty::Seconds;

use crate::core::domain::{Observation, ObservationSet};

/// Forward-only nearest-neighbour search over a reference sequence.
///
/// # Examples
///
/// ```
/// use relpos::algorithms::matcher::TimeMatcher;
/// use relpos::core::domain::{Boresight, ClockTime, Observation, ObservationSet};
/// use qtty::{Degrees, Seconds};
///
/// let at = |second: u16| Observation::new(
///     Boresight::new(Degrees::new(0.0), Degrees::new(0.0)),
///     171028,
///     ClockTime::new(12, 0, second * 100).unwrap(),
///     "label",
/// );
/// let reference = ObservationSet::with_observations("005", vec![at(0), at(20), at(40)]);
///
/// let mut matcher = TimeMatcher::new(&reference, Seconds::new(10.0));
/// assert_eq!(matcher.next_match(Seconds::new(43221.0)), Some(1));
/// assert_eq!(matcher.cursor(), 1);
/// // Never looks back behind the cursor.
/// assert_eq!(matcher.next_match(Seconds::new(43200.0)), None);
/// ```
pub struct TimeMatcher<'a> {
    reference: &'a [Observation],
    tolerance: Seconds,
    cursor: usize,
}

impl<'a> TimeMatcher<'a> {
    pub fn new(reference: &'a ObservationSet, tolerance: Seconds) -> Self {
        Self::from_slice(&reference.observations, tolerance)
    }

    pub fn from_slice(reference: &'a [Observation], tolerance: Seconds) -> Self {
        Self {
            reference,
            tolerance,
            cursor: 0,
        }
    }

    /// Index the next search starts from.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn tolerance(&self) -> Seconds {
        self.tolerance
    }

    /// Index `i >= from` of the reference record closest to `t`.
    ///
    /// The scan stops at the first record farther from `t` than its
    /// predecessor; ties move forward. Returns `None` when `from` is past the
    /// end or the closest record is more than the tolerance away.
    pub fn find_nearest(&self, t: Seconds, from: usize) -> Option<usize> {
        let candidates = self.reference.get(from..)?;
        let first = candidates.first()?;

        let mut best = from;
        let mut best_dt = (t - first.time_of_day).abs();
        for (offset, obs) in candidates.iter().enumerate().skip(1) {
            let dt = (t - obs.time_of_day).abs();
            if dt > best_dt {
                break;
            }
            best = from + offset;
            best_dt = dt;
        }

        if best_dt > self.tolerance {
            None
        } else {
            Some(best)
        }
    }

    /// Like [`Self::find_nearest`] from the cursor, advancing the cursor to
    /// the returned index. A miss leaves the cursor in place.
    pub fn next_match(&mut self, t: Seconds) -> Option<usize> {
        let found = self.find_nearest(t, self.cursor)?;
        self.cursor = found;
        Some(found)
    }
}

/// Matches every follower record, returning `(follower index, reference
/// index)` pairs in follower order. Unmatched follower records are skipped.
pub fn match_indices(
    reference: &ObservationSet,
    follower: &ObservationSet,
    tolerance: Seconds,
) -> Vec<(usize, usize)> {
    let mut matcher = TimeMatcher::new(reference, tolerance);
    let mut pairs = Vec::new();

    for (i, obs) in follower.observations.iter().enumerate() {
        match matcher.next_match(obs.time_of_day) {
            Some(j) => pairs.push((i, j)),
            None => debug!(
                "no FFoV record within {} s of <{}>",
                matcher.tolerance().value(),
                obs.source_label
            ),
        }
    }

    pairs
}
