//! Fixed-width report rendering and report files.
//!
//! The table layout is column-compatible with the existing offset reports so
//! downstream scripts keep parsing them: right-aligned columns of widths
//! `8 8 33 8 8 33 5 4 6 5` separated by single spaces.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::algorithms::analysis::{ReportRow, RunStatistics};
use crate::core::domain::ObservationSet;

/// Banner line framing the statistics block.
pub const STATISTICS_BANNER: &str =
    "****************************** Statistical results ******************************";

const HEADER_LABELS: [&str; 10] = [
    "R.A.  ",
    "DEC.  ",
    "FileName            ",
    "R.A.0 ",
    "DEC.0 ",
    "FileName.0          ",
    "Rot ",
    "Tilt",
    "rRot ",
    "rTilt",
];

/// Everything a completed run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub reference_camera: String,
    pub follower_camera: String,
    pub rows: Vec<ReportRow>,
    pub statistics: RunStatistics,
    /// Report file written, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<PathBuf>,
    /// Why the report file could not be written. Does not fail the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_error: Option<String>,
}

/// Renders report tables and statistics
pub struct ReportWriter;

impl ReportWriter {
    pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
        let l = HEADER_LABELS;
        writeln!(
            out,
            "{:>8} {:>8} {:>33} {:>8} {:>8} {:>33} {:>5} {:>4} {:>6} {:>5}",
            l[0], l[1], l[2], l[3], l[4], l[5], l[6], l[7], l[8], l[9]
        )
    }

    pub fn write_row<W: Write>(out: &mut W, row: &ReportRow) -> io::Result<()> {
        writeln!(
            out,
            "{:8.4} {:8.4} {:>33} {:8.4} {:8.4} {:>33} {:5.1} {:4.1} {:6.1} {:5.1}",
            row.ra,
            row.dec,
            row.file_name,
            row.ra0,
            row.dec0,
            row.file_name0,
            row.rotation,
            row.tilt,
            row.relative_rotation,
            row.relative_tilt
        )
    }

    /// Header followed by every row in order.
    pub fn write_table<W: Write>(out: &mut W, rows: &[ReportRow]) -> io::Result<()> {
        Self::write_header(out)?;
        for row in rows {
            Self::write_row(out, row)?;
        }
        Ok(())
    }

    /// Statistics block between two banner lines.
    ///
    /// Rotation min/mean/max are shown wrapped into `[0, 360)`.
    pub fn write_statistics<W: Write>(out: &mut W, stats: &RunStatistics) -> io::Result<()> {
        let rot = stats.rotation_for_display();
        let tilt = stats.tilt;

        writeln!(out, "{}", STATISTICS_BANNER)?;
        writeln!(
            out,
            "Rotation Minimum = {:6.1} \t Rotation Maximum = {:6.1}",
            rot.min, rot.max
        )?;
        writeln!(
            out,
            "Rotation Mean    = {:6.2} \t Rotation Stdev   = {:6.2}",
            rot.mean, rot.stdev
        )?;
        writeln!(
            out,
            "Tilt Minimum     = {:6.1} \t Tilt Maximum     = {:6.1}",
            tilt.min, tilt.max
        )?;
        writeln!(
            out,
            "Tilt Mean        = {:6.2} \t Tilt Stdev       = {:6.2}",
            tilt.mean, tilt.stdev
        )?;
        writeln!(out, "{}", STATISTICS_BANNER)
    }

    /// `G<camera>_<hhmm>-<hhmm>.txt` from the first and last follower record.
    ///
    /// # Examples
    ///
    /// ```
    /// use relpos::core::domain::{Boresight, ClockTime, Observation, ObservationSet};
    /// use relpos::io::report::ReportWriter;
    /// use qtty::Degrees;
    ///
    /// let at = |h, m| Observation::new(
    ///     Boresight::new(Degrees::new(0.0), Degrees::new(0.0)),
    ///     171028,
    ///     ClockTime::new(h, m, 0).unwrap(),
    ///     "label",
    /// );
    /// let follower = ObservationSet::with_observations("001", vec![at(9, 5), at(13, 40)]);
    /// assert_eq!(
    ///     ReportWriter::output_file_name(&follower).as_deref(),
    ///     Some("G001_0905-1340.txt")
    /// );
    /// ```
    pub fn output_file_name(follower: &ObservationSet) -> Option<String> {
        let first = follower.first()?.clock;
        let last = follower.last()?.clock;
        Some(format!(
            "G{}_{:02}{:02}-{:02}{:02}.txt",
            follower.camera_id, first.hour, first.minute, last.hour, last.minute
        ))
    }

    /// Write the table to `dir/name`, returning the path written.
    pub fn save_table(dir: &Path, name: &str, rows: &[ReportRow]) -> io::Result<PathBuf> {
        let path = dir.join(name);
        {
            let mut out = BufWriter::new(File::create(&path)?);
            Self::write_table(&mut out, rows)?;
            out.flush()?;
        }
        Ok(path)
    }

    /// Write `report` as pretty JSON next to the table, replacing the
    /// table's extension with `.json`.
    pub fn save_json(dir: &Path, name: &str, report: &RunReport) -> io::Result<PathBuf> {
        let path = dir.join(Path::new(name).with_extension("json"));
        {
            let mut out = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut out, report)?;
            writeln!(out)?;
            out.flush()?;
        }
        Ok(path)
    }
}
