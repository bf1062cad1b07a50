//! Coordinate geometry on the celestial sphere.

pub mod spherical;

pub use spherical::{rotate_to_frame, to_cartesian, to_spherical, SphericalCoord};
