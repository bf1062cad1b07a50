//! Relative position of a JFoV camera with respect to an FFoV camera.
//!
//! Reads the pointing logs of both cameras, matches their exposures in time
//! and prints the rotation and tilt of the JFoV boresight about the FFoV
//! boresight, followed by run statistics. The table is also saved as
//! `G<camera>_<hhmm>-<hhmm>.txt`.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use relpos::config::RunConfig;
use relpos::core::context::OverlapPolicy;
use relpos::core::error::RelposError;
use relpos::pipeline::{RelposPipeline, RunOutcome};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE_EXIT: u8 = 1;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Rotation and tilt of a JFoV camera relative to an FFoV camera"
)]
struct Args {
    #[arg(help = "Pointing log of the first camera")]
    path1: PathBuf,

    #[arg(help = "Pointing log of the second camera")]
    path2: PathBuf,

    #[arg(
        allow_negative_numbers = true,
        help = "Base rotation the rRot column is measured against (degrees)"
    )]
    rotation_base: Option<f64>,

    #[arg(
        allow_negative_numbers = true,
        help = "Base tilt the rTilt column is measured against (degrees)"
    )]
    inclination_base: Option<f64>,

    #[arg(short, long, help = "Configuration file (default: relpos.toml if present)")]
    config: Option<PathBuf>,

    #[arg(short, long, value_name = "SECS", help = "Largest time difference of a matched pair")]
    tolerance: Option<f64>,

    #[arg(long, value_name = "POLICY", help = "Time overlap check: same-date or interval")]
    overlap: Option<OverlapPolicy>,

    #[arg(short, long, help = "Directory the report file is written to")]
    output_dir: Option<PathBuf>,

    #[arg(long, help = "Only print to the console, do not save the report file")]
    no_file: bool,

    #[arg(long, help = "Also save the report as JSON")]
    json: bool,
}

impl Args {
    /// Command-line values take precedence over the configuration file.
    fn apply(&self, config: &mut RunConfig) {
        if let Some(rotation) = self.rotation_base {
            config.offset.base_rotation = rotation;
        }
        if let Some(tilt) = self.inclination_base {
            config.offset.base_tilt = tilt;
        }
        if let Some(tolerance) = self.tolerance {
            config.matching.tolerance_secs = tolerance;
        }
        if let Some(overlap) = self.overlap {
            config.matching.overlap = overlap;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
        if self.no_file {
            config.output.write_file = false;
        }
        if self.json {
            config.output.json_summary = true;
        }
    }
}

fn load_config(args: &Args) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => RunConfig::from_default_location()?,
    };
    args.apply(&mut config);
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<RunOutcome> {
    let config = load_config(&args)?;
    info!(
        base_rotation = config.offset.base_rotation,
        base_tilt = config.offset.base_tilt,
        tolerance_secs = config.matching.tolerance_secs,
        "Starting run"
    );

    let mut pipeline = RelposPipeline::from_config(&config);
    let stdout = io::stdout();
    let mut console = stdout.lock();
    let outcome = pipeline.run(&[&args.path1, &args.path2], &mut console)?;
    console.flush()?;
    Ok(outcome)
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<RelposError>()
        .map(RelposError::exit_code)
        .unwrap_or(USAGE_EXIT)
}

/// `--help` and `--version` end the process normally.
fn parse_exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => USAGE_EXIT,
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_exit_code(e.kind()));
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(RunOutcome::NoMatches) => {
            info!("Run finished without matches");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Completed(report)) => {
            if let Some(reason) = &report.output_error {
                error!("Report file was not written: {}", reason);
            }
            info!(pairs = report.rows.len(), "Run finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[offset]
base_rotation = 1.0
base_tilt = 2.0

[matching]
tolerance_secs = 8.0
overlap = "interval"

[roles]
reference_modulus = 10

[output]
directory = "reports"
json_summary = true
"#
        )
        .unwrap();
        file
    }

    #[test]
    fn test_command_line_overrides_config_file() {
        let file = config_file();
        let config_path = file.path().to_str().unwrap();
        let args = Args::try_parse_from([
            "relpos", "a.txt", "b.txt", "-12.5", "0.3", "--tolerance", "5", "--no-file", "-c",
            config_path,
        ])
        .unwrap();
        assert_eq!(args.path1, PathBuf::from("a.txt"));
        assert_eq!(args.path2, PathBuf::from("b.txt"));
        assert_eq!(args.rotation_base, Some(-12.5));

        let config = load_config(&args).unwrap();
        assert_eq!(config.offset.base_rotation, -12.5);
        assert_eq!(config.offset.base_tilt, 0.3);
        assert_eq!(config.matching.tolerance_secs, 5.0);
        assert!(!config.output.write_file);

        // Untouched by the command line.
        assert_eq!(config.matching.overlap, OverlapPolicy::Interval);
        assert_eq!(config.roles.reference_modulus, 10);
        assert_eq!(config.output.directory, PathBuf::from("reports"));
        assert!(config.output.json_summary);
    }

    #[test]
    fn test_config_file_kept_without_overrides() {
        let file = config_file();
        let args = Args::try_parse_from(["relpos", "a.txt", "b.txt"]).unwrap();
        assert!(args.rotation_base.is_none());
        assert!(args.inclination_base.is_none());

        let mut config = RunConfig::from_file(file.path()).unwrap();
        let before = config.clone();
        args.apply(&mut config);
        assert_eq!(config, before);
    }

    #[test]
    fn test_flag_overrides() {
        let args = Args::try_parse_from([
            "relpos", "a.txt", "b.txt", "--overlap", "interval", "-o", "out", "--json",
        ])
        .unwrap();
        let mut config = RunConfig::default();
        args.apply(&mut config);
        assert_eq!(config.matching.overlap, OverlapPolicy::Interval);
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert!(config.output.json_summary);
        assert!(config.output.write_file);
    }

    #[test]
    fn test_negative_bases_are_values() {
        let args = Args::try_parse_from(["relpos", "a.txt", "b.txt", "-1", "-0.25"]).unwrap();
        assert_eq!(args.rotation_base, Some(-1.0));
        assert_eq!(args.inclination_base, Some(-0.25));
    }

    #[test]
    fn test_wrong_path_count_is_usage_error() {
        for argv in [
            vec!["relpos"],
            vec!["relpos", "a.txt"],
            vec!["relpos", "a.txt", "b.txt", "c.txt"],
        ] {
            let err = Args::try_parse_from(argv.clone()).unwrap_err();
            assert!(
                !matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion),
                "{argv:?}"
            );
            assert_eq!(parse_exit_code(err.kind()), USAGE_EXIT);
        }
    }

    #[test]
    fn test_help_and_version_exit_cleanly() {
        for flag in ["--help", "--version"] {
            let err = Args::try_parse_from(["relpos", flag]).unwrap_err();
            assert_eq!(parse_exit_code(err.kind()), 0);
        }
    }

    #[test]
    fn test_invalid_tolerance_is_configuration_error() {
        let file = config_file();
        let config_path = file.path().to_str().unwrap();
        let args = Args::try_parse_from([
            "relpos", "a.txt", "b.txt", "--tolerance", "NaN", "-c", config_path,
        ])
        .unwrap();
        let err = load_config(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RelposError>(),
            Some(RelposError::Configuration(_))
        ));
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_exit_code_follows_error_kind() {
        let temporal = anyhow::Error::new(RelposError::TemporalInconsistency("dates".into()));
        assert_eq!(exit_code(&temporal), 4);

        let missing = anyhow::Error::new(RelposError::Configuration("missing".into()))
            .context("Failed to load configuration relpos.toml");
        assert_eq!(exit_code(&missing), 1);

        assert_eq!(exit_code(&anyhow::anyhow!("stdout closed")), USAGE_EXIT);
    }
}
