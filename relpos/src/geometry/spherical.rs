//! Spherical/Cartesian conversion and re-expression of a direction in a frame
//! whose pole is an arbitrary reference direction.
//!
//! Angles are [`Radians`] throughout; callers convert from and to degrees at
//! their own boundary.

use std::f64::consts::TAU;

use qtty::Radians;

/// Position on a sphere of radius `radius`.
///
/// `azimuth` lies in `[0, 2π)`, `elevation` in `[-π/2, π/2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoord {
    pub radius: f64,
    pub azimuth: Radians,
    pub elevation: Radians,
}

/// Spherical to Cartesian.
///
/// `x = r·cos(el)·cos(az)`, `y = r·cos(el)·sin(az)`, `z = r·sin(el)`.
///
/// # Examples
///
/// ```
/// use relpos::geometry::spherical::to_cartesian;
/// use qtty::Radians;
///
/// let (x, y, z) = to_cartesian(2.0, Radians::new(0.0), Radians::new(0.0));
/// assert_eq!((x, y, z), (2.0, 0.0, 0.0));
/// ```
pub fn to_cartesian(radius: f64, azimuth: Radians, elevation: Radians) -> (f64, f64, f64) {
    let (sin_az, cos_az) = azimuth.sin_cos();
    let (sin_el, cos_el) = elevation.sin_cos();
    (
        radius * cos_el * cos_az,
        radius * cos_el * sin_az,
        radius * sin_el,
    )
}

/// Cartesian to spherical, azimuth normalized into `[0, 2π)`.
pub fn to_spherical(x: f64, y: f64, z: f64) -> SphericalCoord {
    let radius = (x * x + y * y + z * z).sqrt();
    let mut azimuth = y.atan2(x);
    if azimuth < 0.0 {
        azimuth += TAU;
        // Tiny negatives round up to a full turn.
        if azimuth >= TAU {
            azimuth = 0.0;
        }
    }
    let elevation = z.atan2(x.hypot(y));

    SphericalCoord {
        radius,
        azimuth: Radians::new(azimuth),
        elevation: Radians::new(elevation),
    }
}

/// Re-expresses `(azimuth, elevation)` in the frame whose pole points at
/// `(ref_azimuth, ref_elevation)`.
///
/// The input is rotated about the polar axis by `-ref_azimuth`, then about the
/// resulting equatorial axis by `-(π/2 - ref_elevation)`. In the new frame the
/// returned elevation is `π/2` minus the angular distance from the reference
/// direction and the returned azimuth is the position angle about it.
///
/// # Examples
///
/// ```
/// use relpos::geometry::spherical::rotate_to_frame;
/// use qtty::Radians;
///
/// let (az, el) = (Radians::new(1.2), Radians::new(0.3));
/// let (_, new_el) = rotate_to_frame(az, el, az, el);
/// assert!((new_el.value() - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
/// ```
pub fn rotate_to_frame(
    ref_azimuth: Radians,
    ref_elevation: Radians,
    azimuth: Radians,
    elevation: Radians,
) -> (Radians, Radians) {
    let (x1, y1, z1) = to_cartesian(1.0, azimuth, elevation);
    let (sin_a0, cos_a0) = ref_azimuth.sin_cos();
    let (sin_b0, cos_b0) = ref_elevation.sin_cos();

    let x2 = sin_b0 * cos_a0 * x1 + sin_b0 * sin_a0 * y1 - cos_b0 * z1;
    let y2 = -sin_a0 * x1 + cos_a0 * y1;
    let z2 = cos_b0 * cos_a0 * x1 + cos_b0 * sin_a0 * y1 + sin_b0 * z1;

    let rotated = to_spherical(x2, y2, z2);
    (rotated.azimuth, rotated.elevation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_to_cartesian_axes() {
        let (x, y, z) = to_cartesian(1.0, Radians::new(FRAC_PI_2), Radians::new(0.0));
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(z, 0.0, epsilon = 1e-12);

        let (x, y, z) = to_cartesian(3.0, Radians::new(0.7), Radians::new(FRAC_PI_2));
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_to_spherical_normalizes_negative_azimuth() {
        let s = to_spherical(0.0, -1.0, 0.0);
        assert_abs_diff_eq!(s.azimuth.value(), 1.5 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(s.elevation.value(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.radius, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_to_spherical_elevation_sign() {
        let s = to_spherical(1.0, 0.0, -1.0);
        assert_abs_diff_eq!(s.elevation.value(), -PI / 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.radius, 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_reference_direction_maps_to_pole() {
        for &(az, el) in &[(0.0, 0.0), (1.0, 0.5), (4.0, -1.2), (6.2, 1.5)] {
            let (_, new_el) =
                rotate_to_frame(Radians::new(az), Radians::new(el), Radians::new(az), Radians::new(el));
            assert_abs_diff_eq!(new_el.value(), FRAC_PI_2, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_pole_reference_keeps_elevation() {
        // With the reference at the north pole only the azimuth changes.
        let (az, el) = rotate_to_frame(
            Radians::new(0.0),
            Radians::new(FRAC_PI_2),
            Radians::new(0.5),
            Radians::new(0.2),
        );
        assert_abs_diff_eq!(el.value(), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(az.value(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_separation_along_meridian() {
        // One degree north of an equatorial reference.
        let one_deg = 1f64.to_radians();
        let (az, el) = rotate_to_frame(
            Radians::new(0.3),
            Radians::new(0.0),
            Radians::new(0.3),
            Radians::new(one_deg),
        );
        assert_abs_diff_eq!(FRAC_PI_2 - el.value(), one_deg, epsilon = 1e-12);
        // North of the reference lies along the -x axis of the rotated frame.
        assert_abs_diff_eq!(az.value(), PI, epsilon = 1e-9);
    }
}
