//! Matching, offset computation and result aggregation.
//!
//! # Components
//!
//! - [`matcher`]: Forward-only nearest-in-time matching of follower records
//! - [`offset`]: Rotation/tilt of a follower boresight about a reference boresight
//! - [`analysis`]: Report rows and run statistics over matched offsets

pub mod analysis;
pub mod matcher;
pub mod offset;

pub use analysis::{ReportRow, ResultAggregator, RunStatistics, Summary};
pub use matcher::{match_indices, TimeMatcher};
pub use offset::OffsetComputer;
