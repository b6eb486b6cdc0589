//! labelfix: repair and split normalized bounding-box label files.
//!
//! Label files hold one bounding box per line: a class id followed by four
//! or more normalized coordinates. This crate ships two tools built on one
//! shared token rule:
//!
//! - `fix-labels` rewrites every `.txt` label file in a folder in place.
//! - `split-labels` splits one aggregate file (`<image> <labels...>` per line)
//!   into a label file per image.
//!
//! # Modules
//!
//! - [`label`]: the shared token rule and the clean report
//! - [`fix`]: the Label Fixer
//! - [`split`]: the Label Splitter
//! - [`error`]: error types for labelfix operations

pub mod error;
pub mod fix;
pub mod label;
pub mod progress;
pub mod split;

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use serde::Serialize;

pub use error::LabelfixError;

/// Repair every .txt label file in a folder in place.
///
/// Commas become spaces, every box lands on its own line, and corrupt boxes
/// are dropped with a warning.
#[derive(Parser, Debug)]
#[command(name = "fix-labels")]
#[command(version, author, about)]
struct FixCli {
    /// Folder containing the .txt label files to fix.
    folder: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

/// Split an aggregate label file into one label file per image.
///
/// Each input line is an image file name followed by its label tokens.
#[derive(Parser, Debug)]
#[command(name = "split-labels")]
#[command(version, author, about)]
struct SplitCli {
    /// Aggregate label file (e.g. train2017.txt).
    #[arg(long)]
    input: PathBuf,

    /// Destination folder for the per-image label files.
    #[arg(long)]
    output: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

/// Flags shared by both tools.
#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Less log output (-q warnings only, -qq errors only).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,

    /// Do not draw a progress bar.
    #[arg(
        long,
        env = "LABELFIX_NO_PROGRESS",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    no_progress: bool,

    /// Format of the summary printed on stdout.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

/// Summary output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Run the `fix-labels` CLI with the process arguments.
pub fn run_fix() -> Result<(), LabelfixError> {
    run_fix_from(std::env::args_os())
}

/// Run the `fix-labels` CLI with explicit arguments (the first is the binary name).
pub fn run_fix_from<I, T>(args: I) -> Result<(), LabelfixError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let Some(cli) = parse_args::<FixCli, _, _>(args)? else {
        return Ok(());
    };
    init_logging(cli.common.verbose, cli.common.quiet);

    let opts = fix::FixOptions {
        show_progress: !cli.common.no_progress,
    };
    let report = fix::fix_labels_in_folder(&cli.folder, &opts)?;
    print_report(&report, cli.common.report)
}

/// Run the `split-labels` CLI with the process arguments.
pub fn run_split() -> Result<(), LabelfixError> {
    run_split_from(std::env::args_os())
}

/// Run the `split-labels` CLI with explicit arguments (the first is the binary name).
pub fn run_split_from<I, T>(args: I) -> Result<(), LabelfixError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let Some(cli) = parse_args::<SplitCli, _, _>(args)? else {
        return Ok(());
    };
    init_logging(cli.common.verbose, cli.common.quiet);

    let opts = split::SplitOptions {
        show_progress: !cli.common.no_progress,
    };
    let report = split::split_labels(&cli.input, &cli.output, &opts)?;
    print_report(&report, cli.common.report)
}

/// Turn a CLI result into the process exit code, printing any error on stderr.
///
/// Usage errors print clap's message as-is; everything else is prefixed
/// with `Error:`. Both exit with code 1.
pub fn exit_code(result: Result<(), LabelfixError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(LabelfixError::Usage(message)) => {
            eprint!("{}", message);
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Parse arguments, printing `--help`/`--version` output and returning `None` for them.
fn parse_args<C, I, T>(args: I) -> Result<Option<C>, LabelfixError>
where
    C: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match C::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) if !err.use_stderr() => {
            err.print()?;
            Ok(None)
        }
        Err(err) => Err(LabelfixError::Usage(err.render().to_string())),
    }
}

fn init_logging(verbose: u8, quiet: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format_timestamp(None).format_target(false);

    let level = match (verbose, quiet) {
        (0, 0) => None,
        (_, 1) => Some(LevelFilter::Warn),
        (_, q) if q > 1 => Some(LevelFilter::Error),
        (1, _) => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };
    if let Some(level) = level {
        builder.filter_level(level);
    }

    let _ = builder.try_init();
}

fn print_report<R>(report: &R, format: ReportFormat) -> Result<(), LabelfixError>
where
    R: Serialize + fmt::Display,
{
    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        ReportFormat::Text => print!("{}", report),
    }
    Ok(())
}
