//! Run configuration file support.
//!
//! This module reads run settings from a TOML file. Every section and key is
//! optional; missing values take the defaults of [`RunConfig::default`].
//!
//! ```toml
//! [offset]
//! base_rotation = 0.0
//! base_tilt = 0.0
//!
//! [matching]
//! tolerance_secs = 10.0
//! overlap = "same-date"
//!
//! [roles]
//! reference_modulus = 5
//!
//! [output]
//! directory = "."
//! write_file = true
//! json_summary = false
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::context::{OverlapPolicy, DEFAULT_REFERENCE_MODULUS, DEFAULT_TOLERANCE_SECS};
use crate::core::error::{RelposError, Result};

/// Name of the configuration file looked up by [`RunConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "relpos.toml";

/// Run configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub offset: OffsetSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub roles: RoleSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Base values the relative columns are measured against, in degrees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OffsetSettings {
    #[serde(default)]
    pub base_rotation: f64,
    #[serde(default)]
    pub base_tilt: f64,
}

/// Time matching settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_tolerance_secs")]
    pub tolerance_secs: f64,
    #[serde(default)]
    pub overlap: OverlapPolicy,
}

/// Camera role settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSettings {
    #[serde(default = "default_reference_modulus")]
    pub reference_modulus: u32,
}

/// Report output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_true")]
    pub write_file: bool,
    #[serde(default)]
    pub json_summary: bool,
}

fn default_tolerance_secs() -> f64 {
    DEFAULT_TOLERANCE_SECS
}

fn default_reference_modulus() -> u32 {
    DEFAULT_REFERENCE_MODULUS
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            tolerance_secs: default_tolerance_secs(),
            overlap: OverlapPolicy::default(),
        }
    }
}

impl Default for RoleSettings {
    fn default() -> Self {
        Self {
            reference_modulus: default_reference_modulus(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            write_file: default_true(),
            json_summary: false,
        }
    }
}

impl RunConfig {
    /// Load run configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(RunConfig)` if the file was read, parsed and validated
    /// * `Err(RelposError::Configuration)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RelposError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    ///
    /// # Examples
    ///
    /// ```
    /// use relpos::config::RunConfig;
    /// use relpos::core::context::OverlapPolicy;
    ///
    /// let config = RunConfig::from_toml_str("[matching]\noverlap = \"interval\"\n").unwrap();
    /// assert_eq!(config.matching.overlap, OverlapPolicy::Interval);
    /// assert_eq!(config.matching.tolerance_secs, 10.0);
    /// assert_eq!(config.roles.reference_modulus, 5);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(content).map_err(|e| {
            RelposError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load run configuration from the default location.
    ///
    /// Searches for `relpos.toml` in:
    /// 1. Current directory
    /// 2. Parent directory
    ///
    /// Falls back to [`RunConfig::default`] when none exists.
    pub fn from_default_location() -> Result<Self> {
        for path in Self::search_paths() {
            if path.exists() {
                log::info!("Using configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    fn search_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ]
    }

    /// Reject settings no run can use.
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.matching.tolerance_secs;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(RelposError::Configuration(format!(
                "matching.tolerance_secs must be a non-negative number, got {}",
                tolerance
            )));
        }

        if self.roles.reference_modulus == 0 {
            return Err(RelposError::Configuration(
                "roles.reference_modulus must be greater than zero".to_string(),
            ));
        }

        for (key, value) in [
            ("offset.base_rotation", self.offset.base_rotation),
            ("offset.base_tilt", self.offset.base_tilt),
        ] {
            if !value.is_finite() {
                return Err(RelposError::Configuration(format!(
                    "{} must be a finite number, got {}",
                    key, value
                )));
            }
        }

        Ok(())
    }
}
