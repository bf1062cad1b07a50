//! Rotation/tilt offset of a follower boresight about a reference boresight.

use qtty::{Degree, Degrees, Radian};

use crate::core::domain::{Boresight, MatchedPair, Observation};
use crate::geometry::spherical::rotate_to_frame;

/// Turns matched records into offset records.
pub struct OffsetComputer;

impl OffsetComputer {
    /// Rotation and tilt of `follower` in the frame centered on `reference`.
    ///
    /// Rotation is the position angle about the reference axis in `[0, 360)`;
    /// tilt is `90° - elevation`, the angular distance from the reference
    /// axis. When the two axes coincide the tilt is 0 and the rotation carries
    /// no information.
    ///
    /// # Examples
    ///
    /// ```
    /// use relpos::algorithms::offset::OffsetComputer;
    /// use relpos::core::domain::Boresight;
    /// use qtty::Degrees;
    ///
    /// let reference = Boresight::new(Degrees::new(10.0), Degrees::new(20.0));
    /// let follower = Boresight::new(Degrees::new(10.0), Degrees::new(22.0));
    /// let (_, tilt) = OffsetComputer::offset(reference, follower);
    /// assert!((tilt.value() - 2.0).abs() < 1e-9);
    /// ```
    pub fn offset(reference: Boresight, follower: Boresight) -> (Degrees, Degrees) {
        let (azimuth, elevation) = rotate_to_frame(
            reference.ra().to::<Radian>(),
            reference.dec().to::<Radian>(),
            follower.ra().to::<Radian>(),
            follower.dec().to::<Radian>(),
        );

        let rotation = azimuth.to::<Degree>();
        let tilt = Degrees::new(90.0 - elevation.to::<Degree>().value());
        (rotation, tilt)
    }

    /// Offset record for one matched `(follower, reference)` pair.
    pub fn compute(follower: &Observation, reference: &Observation) -> MatchedPair {
        let (rotation, tilt) = Self::offset(reference.boresight, follower.boresight);
        MatchedPair {
            follower: follower.boresight,
            follower_label: follower.source_label.clone(),
            reference: reference.boresight,
            reference_label: reference.source_label.clone(),
            rotation,
            tilt,
        }
    }
}
