//! File input and report output.
//!
//! [`loaders`] turns pointing logs into observation sets; [`report`] renders
//! the offset table and statistics and writes report files.
//!
//! # Example
//!
//! ```no_run
//! use relpos::io::loaders::ObservationLoader;
//! use std::path::Path;
//!
//! let loaded = ObservationLoader::load_file(Path::new("G001_pointing.txt"))
//!     .expect("Failed to load");
//! println!("Loaded {} points of camera {}", loaded.num_points(), loaded.set.camera_id);
//! ```

pub mod loaders;
pub mod report;

#[cfg(test)]
mod loaders_tests;

pub use loaders::{LoadedFile, ObservationLoader};
pub use report::{ReportWriter, RunReport, STATISTICS_BANNER};
