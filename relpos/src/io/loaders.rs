use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::core::context::RunContext;
use crate::core::domain::{Boresight, CameraRole, Observation, ObservationSet};
use crate::core::error::{RelposError, Result};
use crate::parsing::{LabelParser, LineParser};

/// Result of loading one pointing log
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub set: ObservationSet,
    /// Non-blank lines that could not be turned into a record.
    pub skipped_lines: usize,
}

impl LoadedFile {
    pub fn num_points(&self) -> usize {
        self.set.len()
    }
}

/// Turns pointing logs into [`ObservationSet`]s.
pub struct ObservationLoader;

impl ObservationLoader {
    /// Load a pointing log from disk.
    ///
    /// The file is only open for the duration of this call.
    pub fn load_file(path: &Path) -> Result<LoadedFile> {
        let file = File::open(path).map_err(|e| RelposError::SourceUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::load_from_reader(BufReader::new(file), path)
    }

    /// Load from an in-memory log; `source` names it in messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use relpos::io::loaders::ObservationLoader;
    /// use std::path::Path;
    ///
    /// let log = "10.0 20.0 G005_mon_objt_171028T12000000.fit\n\
    ///            10.1 20.1 G005_mon_objt_171028T12001000.fit\n";
    /// let loaded = ObservationLoader::load_from_str(log, Path::new("ffov.txt")).unwrap();
    /// assert_eq!(loaded.set.camera_id, "005");
    /// assert_eq!(loaded.num_points(), 2);
    /// ```
    pub fn load_from_str(content: &str, source: &Path) -> Result<LoadedFile> {
        Self::load_from_reader(content.as_bytes(), source)
    }

    /// Reads every line of `reader`.
    ///
    /// Blank lines are ignored. Lines whose fields or label cannot be parsed
    /// are skipped with a warning. The camera id of the set comes from the
    /// first record; records from another camera are kept with a warning.
    /// A log without a single usable record is
    /// [`RelposError::SourceUnreadable`].
    pub fn load_from_reader<R: BufRead>(reader: R, source: &Path) -> Result<LoadedFile> {
        let unreadable = |reason: String| RelposError::SourceUnreadable {
            path: source.to_path_buf(),
            reason,
        };

        let mut set: Option<ObservationSet> = None;
        let mut skipped_lines = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| unreadable(e.to_string()))?;
            let line_no = index + 1;

            let record = match Self::parse_record(&line) {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(e) => {
                    warn!("{}:{}: skipped: {}", source.display(), line_no, e);
                    skipped_lines += 1;
                    continue;
                }
            };

            let (camera_id, observation) = record;
            let set = set.get_or_insert_with(|| ObservationSet::new(camera_id.clone()));
            if set.camera_id != camera_id {
                warn!(
                    "{}:{}: camera <{}> differs from <{}> of the first record",
                    source.display(),
                    line_no,
                    camera_id,
                    set.camera_id
                );
            }
            set.push(observation);
        }

        let set = set.ok_or_else(|| unreadable("no valid records".to_string()))?;
        info!(
            "{} points are resolved from file <{}>",
            set.len(),
            source.display()
        );

        Ok(LoadedFile {
            path: source.to_path_buf(),
            set,
            skipped_lines,
        })
    }

    /// Load `path` and store its set in `ctx` under the role of its camera.
    pub fn load_into(path: &Path, ctx: &mut RunContext) -> Result<CameraRole> {
        let loaded = Self::load_file(path)?;
        ctx.assign(loaded.set)
    }

    fn parse_record(line: &str) -> Result<Option<(String, Observation)>> {
        let Some(pointing) = LineParser::parse(line)? else {
            return Ok(None);
        };
        let info = LabelParser::parse(&pointing.label)?;

        let observation = Observation::new(
            Boresight::new(pointing.ra, pointing.dec),
            info.calendar_date,
            info.clock,
            pointing.label,
        );
        Ok(Some((info.camera_id, observation)))
    }
}
