//! One relative-position run, from two pointing logs to a report.
//!
//! The stages run strictly in order and every fatal condition aborts before
//! matching starts:
//!
//! 1. load both logs and assign each to its camera role
//! 2. require a non-empty reference and follower set
//! 3. validate the time coverage of the pair
//! 4. match follower records to reference records and compute offsets
//! 5. print the table and statistics, then write the report file

use log::{debug, info, warn};
use std::io::Write;
use std::path::Path;

use crate::algorithms::analysis::ResultAggregator;
use crate::algorithms::matcher::match_indices;
use crate::algorithms::offset::OffsetComputer;
use crate::config::{OutputSettings, RunConfig};
use crate::core::context::RunContext;
use crate::core::domain::MatchedPair;
use crate::core::error::{RelposError, Result};
use crate::io::loaders::ObservationLoader;
use crate::io::report::{ReportWriter, RunReport};
use crate::preprocessing::validator::TemporalValidator;

/// Console line printed when no follower record found a partner.
pub const NO_MATCHES_MESSAGE: &str = "No data matches the condition";

/// How a run that did not fail ended.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Matching finished without a single pair. No report is written.
    NoMatches,
    Completed(RunReport),
}

impl RunOutcome {
    pub fn report(&self) -> Option<&RunReport> {
        match self {
            RunOutcome::Completed(report) => Some(report),
            RunOutcome::NoMatches => None,
        }
    }
}

/// Drives a run over an explicit [`RunContext`].
pub struct RelposPipeline {
    ctx: RunContext,
    output: OutputSettings,
}

impl RelposPipeline {
    pub fn new(ctx: RunContext, output: OutputSettings) -> Self {
        Self { ctx, output }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(RunContext::from_config(config), config.output.clone())
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut RunContext {
        &mut self.ctx
    }

    /// Runs the whole pipeline over exactly two pointing logs.
    ///
    /// Table, statistics and status lines go to `console`; diagnostics go to
    /// the log.
    pub fn run<P, W>(&mut self, paths: &[P], console: &mut W) -> Result<RunOutcome>
    where
        P: AsRef<Path>,
        W: Write,
    {
        if paths.len() != 2 {
            return Err(RelposError::Usage(format!(
                "expected one FFoV and one JFoV pointing file, got {} files",
                paths.len()
            )));
        }

        for path in paths {
            let role = ObservationLoader::load_into(path.as_ref(), &mut self.ctx)?;
            debug!("{} assigned to {}", path.as_ref().display(), role);
        }

        self.process(console)
    }

    /// Runs every stage after loading, on the sets already assigned to the
    /// context.
    pub fn process<W: Write>(&mut self, console: &mut W) -> Result<RunOutcome> {
        let (pairs, reference_camera, follower_camera, file_name) = {
            let (reference, follower) = self.ctx.sets()?;

            let validation =
                TemporalValidator::validate(reference, follower, self.ctx.overlap, self.ctx.tolerance);
            for warning in &validation.warnings {
                warn!("{}", warning);
            }
            validation.into_result()?;

            let pairs: Vec<MatchedPair> = match_indices(reference, follower, self.ctx.tolerance)
                .into_iter()
                .map(|(i, j)| {
                    OffsetComputer::compute(&follower.observations[i], &reference.observations[j])
                })
                .collect();
            info!(
                "{} of {} JFoV points matched within {} s",
                pairs.len(),
                follower.len(),
                self.ctx.tolerance.value()
            );

            (
                pairs,
                reference.camera_id.clone(),
                follower.camera_id.clone(),
                ReportWriter::output_file_name(follower),
            )
        };
        self.ctx.record_matches(pairs);

        let aggregator = ResultAggregator::from_context(&self.ctx);
        let Some(statistics) = aggregator.statistics(self.ctx.matches()) else {
            info!("no JFoV point has an FFoV point within the tolerance");
            writeln!(console, "{}", NO_MATCHES_MESSAGE)?;
            return Ok(RunOutcome::NoMatches);
        };
        let rows = aggregator.rows(self.ctx.matches());

        ReportWriter::write_table(console, &rows)?;
        ReportWriter::write_statistics(console, &statistics)?;

        let mut report = RunReport {
            reference_camera,
            follower_camera,
            rows,
            statistics,
            saved_to: None,
            output_error: None,
        };

        if let Some(name) = file_name {
            self.save(&name, &mut report, console)?;
        }

        Ok(RunOutcome::Completed(report))
    }

    /// Writes the report files. Failing to create one is recorded in the
    /// report; only console errors propagate.
    fn save<W: Write>(&self, name: &str, report: &mut RunReport, console: &mut W) -> Result<()> {
        let dir = self.output.directory.as_path();

        if self.output.write_file {
            match ReportWriter::save_table(dir, name, &report.rows) {
                Ok(path) => {
                    info!("report saved to {}", path.display());
                    writeln!(
                        console,
                        "---------- results are saved as file<{}> ----------",
                        path.display()
                    )?;
                    report.saved_to = Some(path);
                }
                Err(e) => {
                    let target = dir.join(name);
                    warn!("failed to create {}: {}", target.display(), e);
                    writeln!(console, "failed to create result file<{}>", target.display())?;
                    report.output_error = Some(format!("{}: {}", target.display(), e));
                }
            }
        }

        if self.output.json_summary {
            if let Err(e) = ReportWriter::save_json(dir, name, report) {
                warn!("failed to write JSON summary for {}: {}", name, e);
                if report.output_error.is_none() {
                    report.output_error = Some(e.to_string());
                }
            }
        }

        Ok(())
    }
}
