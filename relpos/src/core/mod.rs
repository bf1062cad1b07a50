//! Core types shared by every stage of a run.

pub mod context;
pub mod domain;
pub mod error;

pub use context::{DivisibleBy, OverlapPolicy, RolePolicy, RunContext};
pub use domain::{Boresight, CameraRole, ClockTime, MatchedPair, Observation, ObservationSet};
pub use error::{RelposError, Result};
