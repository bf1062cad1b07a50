//! Relative pointing offset between two co-mounted fields of view.
//!
//! Given the pointing logs of a wide reference camera (FFoV) and a narrow
//! follower camera (JFoV), every follower exposure is matched to the nearest
//! reference exposure in time and the follower boresight is expressed in a
//! frame centered on the reference boresight. The result is a rotation and a
//! tilt per matched pair plus run statistics.
//!
//! ```no_run
//! use relpos::config::RunConfig;
//! use relpos::pipeline::{RelposPipeline, RunOutcome};
//!
//! let config = RunConfig::from_default_location()?;
//! let mut pipeline = RelposPipeline::from_config(&config);
//! let outcome = pipeline.run(&["G005_ffov.txt", "G001_jfov.txt"], &mut std::io::stdout())?;
//! if let RunOutcome::Completed(report) = outcome {
//!     println!("{} pairs", report.rows.len());
//! }
//! # Ok::<(), relpos::core::error::RelposError>(())
//! ```

pub mod algorithms;
pub mod config;
pub mod core;
pub mod geometry;
pub mod io;
pub mod parsing;
pub mod pipeline;
pub mod preprocessing;

pub use crate::core::error::{RelposError, Result};
