//! Parsers for pointing-log input.
//!
//! A pointing log holds one exposure per line: the boresight right ascension
//! and declination in degrees followed by the exposure's image label. The
//! label in turn encodes the camera id and the exposure time.
//!
//! # Parsers
//!
//! - [`line_parser`]: Split a log line into coordinates and label
//! - [`label_parser`]: Decode camera id, date and time from an image label
//!
//! # Example
//!
//! ```
//! use relpos::parsing::{LabelParser, LineParser};
//!
//! let line = LineParser::parse("10.0 20.0 G005_mon_objt_171028T12000000.fit")
//!     .unwrap()
//!     .unwrap();
//! let info = LabelParser::parse(&line.label).unwrap();
//! assert_eq!(info.camera_id, "005");
//! ```

pub mod label_parser;
pub mod line_parser;

#[cfg(test)]
mod label_parser_tests;

pub use label_parser::{LabelInfo, LabelParser};
pub use line_parser::{LineParser, PointingLine};
