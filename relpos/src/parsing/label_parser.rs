//! Image label parsing.
//!
//! Pointing logs carry the FITS file name of every exposure. The name encodes
//! the camera and the UTC exposure time:
//!
//! ```text
//! G<camera>_[mon_]<image type>_<YYMMDD>T<hhmmssff>.fit
//! ```
//!
//! where `ff` are hundredths of a second. The leading `G`, the extension and
//! any directory prefix are optional.

use chrono::NaiveDate;

use crate::core::domain::ClockTime;
use crate::core::error::{RelposError, Result};

/// File extensions stripped before parsing, longest first.
const IMAGE_EXTENSIONS: &[&str] = &[".fits", ".fit", ".fts"];

/// Camera and exposure time decoded from an image label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelInfo {
    pub camera_id: String,
    pub calendar_date: u32,
    pub clock: ClockTime,
}

/// Parser for image labels
pub struct LabelParser;

impl LabelParser {
    /// Decode `label`.
    ///
    /// # Examples
    ///
    /// ```
    /// use relpos::parsing::LabelParser;
    ///
    /// let info = LabelParser::parse("G011_mon_objt_171028T10123045.fit").unwrap();
    /// assert_eq!(info.camera_id, "011");
    /// assert_eq!(info.calendar_date, 171028);
    /// assert_eq!(info.clock.hour, 10);
    /// assert_eq!(info.clock.minute, 12);
    /// assert_eq!(info.clock.centis, 3045);
    /// ```
    pub fn parse(label: &str) -> Result<LabelInfo> {
        let name = label.rsplit(['/', '\\']).next().unwrap_or(label);
        let stem = strip_extension(name);
        let stem = stem
            .strip_prefix('G')
            .or_else(|| stem.strip_prefix('g'))
            .unwrap_or(stem);

        let fields: Vec<&str> = stem.split('_').collect();
        if fields.len() < 2 {
            return Err(RelposError::malformed_label(
                label,
                "expected <camera>_..._<YYMMDD>T<hhmmssff>",
            ));
        }

        let camera_id = fields[0];
        if camera_id.is_empty() {
            return Err(RelposError::malformed_label(label, "empty camera id"));
        }

        let timestamp = fields[fields.len() - 1];
        let (date, time) = timestamp
            .split_once(['T', 't'])
            .ok_or_else(|| RelposError::malformed_label(label, "timestamp has no 'T' separator"))?;

        Ok(LabelInfo {
            camera_id: camera_id.to_string(),
            calendar_date: parse_date(label, date)?,
            clock: parse_clock(label, time)?,
        })
    }
}

/// Names that end inside a multi-byte character have no extension to strip.
fn strip_extension(name: &str) -> &str {
    for ext in IMAGE_EXTENSIONS {
        let Some(cut) = name.len().checked_sub(ext.len()).filter(|&cut| cut > 0) else {
            continue;
        };
        if name.get(cut..).is_some_and(|tail| tail.eq_ignore_ascii_case(ext)) {
            return &name[..cut];
        }
    }
    name
}

fn all_digits(s: &str, n: usize) -> bool {
    s.len() == n && s.bytes().all(|b| b.is_ascii_digit())
}

/// `YYMMDD`, kept as its integer value once it is known to be a real date.
fn parse_date(label: &str, date: &str) -> Result<u32> {
    if !all_digits(date, 6) {
        return Err(RelposError::malformed_label(
            label,
            format!("date '{}' is not YYMMDD", date),
        ));
    }
    NaiveDate::parse_from_str(date, "%y%m%d").map_err(|e| {
        RelposError::malformed_label(label, format!("invalid date '{}': {}", date, e))
    })?;
    date.parse::<u32>()
        .map_err(|e| RelposError::malformed_label(label, e.to_string()))
}

/// `hhmmssff`
fn parse_clock(label: &str, time: &str) -> Result<ClockTime> {
    if !all_digits(time, 8) {
        return Err(RelposError::malformed_label(
            label,
            format!("time '{}' is not hhmmssff", time),
        ));
    }
    let packed = time
        .parse::<u32>()
        .map_err(|e| RelposError::malformed_label(label, e.to_string()))?;

    let centis = (packed % 10_000) as u16;
    let minute = (packed / 10_000 % 100) as u8;
    let hour = (packed / 1_000_000) as u8;

    ClockTime::new(hour, minute, centis).ok_or_else(|| {
        RelposError::malformed_label(label, format!("time '{}' is out of range", time))
    })
}
