//! Explicit per-run state.
//!
//! A [`RunContext`] carries everything one relative-position run needs: the
//! rule deciding which camera is the reference, the base rotation and tilt the
//! relative columns are measured against, matching settings, the two assigned
//! observation sets and the accumulated matches.

use std::str::FromStr;

use log::info;
use qtty::{Degrees, Seconds};
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::core::domain::{CameraRole, MatchedPair, ObservationSet};
use crate::core::error::{RelposError, Result};

/// Default largest time difference between matched records.
pub const DEFAULT_TOLERANCE_SECS: f64 = 10.0;

/// Default modulus of the reference-camera rule.
pub const DEFAULT_REFERENCE_MODULUS: u32 = 5;

/// Decides which side of the measurement a camera belongs to.
///
/// Any `Fn(&str) -> CameraRole` is a policy, so tests and callers can swap the
/// rule without touching the pipeline.
///
/// # Examples
///
/// ```
/// use relpos::core::context::{DivisibleBy, RolePolicy};
/// use relpos::core::domain::CameraRole;
///
/// let policy = DivisibleBy(5);
/// assert_eq!(policy.role("005"), CameraRole::Reference);
/// assert_eq!(policy.role("012"), CameraRole::Follower);
///
/// let by_prefix = |id: &str| {
///     if id.starts_with('W') { CameraRole::Reference } else { CameraRole::Follower }
/// };
/// assert_eq!(by_prefix.role("W01"), CameraRole::Reference);
/// ```
pub trait RolePolicy {
    fn role(&self, camera_id: &str) -> CameraRole;
}

impl<F> RolePolicy for F
where
    F: Fn(&str) -> CameraRole,
{
    fn role(&self, camera_id: &str) -> CameraRole {
        self(camera_id)
    }
}

/// Numeric camera ids divisible by the modulus are reference cameras.
///
/// Ids that are not numbers are always followers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivisibleBy(pub u32);

impl RolePolicy for DivisibleBy {
    fn role(&self, camera_id: &str) -> CameraRole {
        match camera_id.trim().parse::<u32>() {
            Ok(n) if self.0 != 0 && n % self.0 == 0 => CameraRole::Reference,
            _ => CameraRole::Follower,
        }
    }
}

impl Default for DivisibleBy {
    fn default() -> Self {
        DivisibleBy(DEFAULT_REFERENCE_MODULUS)
    }
}

/// How the reference and follower time ranges are checked against each other
/// before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// First records of both sets carry the same calendar date.
    #[default]
    SameDate,
    /// Same date, and the follower span widened by the tolerance intersects
    /// the reference span.
    Interval,
}

impl FromStr for OverlapPolicy {
    type Err = RelposError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "same-date" | "same_date" | "date" => Ok(OverlapPolicy::SameDate),
            "interval" | "range" => Ok(OverlapPolicy::Interval),
            other => Err(RelposError::Configuration(format!(
                "Unknown overlap policy: {}. Use 'same-date' or 'interval'",
                other
            ))),
        }
    }
}

/// State of one run, passed explicitly to every stage.
pub struct RunContext {
    role_policy: Box<dyn RolePolicy>,
    pub base_rotation: Degrees,
    pub base_tilt: Degrees,
    pub tolerance: Seconds,
    pub overlap: OverlapPolicy,
    reference: Option<ObservationSet>,
    follower: Option<ObservationSet>,
    matches: Vec<MatchedPair>,
}

impl RunContext {
    /// Context with the default role rule, zero bases and a 10 s tolerance.
    pub fn new() -> Self {
        Self {
            role_policy: Box::new(DivisibleBy::default()),
            base_rotation: Degrees::new(0.0),
            base_tilt: Degrees::new(0.0),
            tolerance: Seconds::new(DEFAULT_TOLERANCE_SECS),
            overlap: OverlapPolicy::default(),
            reference: None,
            follower: None,
            matches: Vec::new(),
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new()
            .with_role_policy(DivisibleBy(config.roles.reference_modulus))
            .with_base(
                Degrees::new(config.offset.base_rotation),
                Degrees::new(config.offset.base_tilt),
            )
            .with_tolerance(Seconds::new(config.matching.tolerance_secs))
            .with_overlap(config.matching.overlap)
    }

    pub fn with_role_policy(mut self, policy: impl RolePolicy + 'static) -> Self {
        self.role_policy = Box::new(policy);
        self
    }

    pub fn with_base(mut self, rotation: Degrees, tilt: Degrees) -> Self {
        self.base_rotation = rotation;
        self.base_tilt = tilt;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Seconds) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn role_of(&self, camera_id: &str) -> CameraRole {
        self.role_policy.role(camera_id)
    }

    /// Stores `set` under the role its camera resolves to.
    ///
    /// A second set for an already filled role is a [`RelposError::RoleConflict`].
    pub fn assign(&mut self, set: ObservationSet) -> Result<CameraRole> {
        let role = self.role_of(&set.camera_id);
        let slot = match role {
            CameraRole::Reference => &mut self.reference,
            CameraRole::Follower => &mut self.follower,
        };

        if let Some(existing) = slot {
            return Err(RelposError::RoleConflict {
                role,
                first: existing.camera_id.clone(),
                second: set.camera_id,
            });
        }

        info!("camera <{}> is considered to be from {}", set.camera_id, role);
        *slot = Some(set);
        Ok(role)
    }

    pub fn reference(&self) -> Option<&ObservationSet> {
        self.reference.as_ref()
    }

    pub fn follower(&self) -> Option<&ObservationSet> {
        self.follower.as_ref()
    }

    /// Both assigned sets as `(reference, follower)`.
    ///
    /// Fails with [`RelposError::RoleIncomplete`] when a role is missing or
    /// its set holds no records. The follower is checked first.
    pub fn sets(&self) -> Result<(&ObservationSet, &ObservationSet)> {
        let follower = self
            .follower
            .as_ref()
            .filter(|s| s.is_valid())
            .ok_or(RelposError::RoleIncomplete(CameraRole::Follower))?;
        let reference = self
            .reference
            .as_ref()
            .filter(|s| s.is_valid())
            .ok_or(RelposError::RoleIncomplete(CameraRole::Reference))?;
        Ok((reference, follower))
    }

    pub fn record_matches(&mut self, matches: Vec<MatchedPair>) {
        self.matches = matches;
    }

    pub fn matches(&self) -> &[MatchedPair] {
        &self.matches
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
