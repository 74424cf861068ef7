//! CLI argument definitions for the scorebatch tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "scorebatch",
    version,
    about = "Batch scoring for an externally trained binary classifier",
    long_about = "Score a tabular file (CSV or spreadsheet) with a trained binary\n\
                  classifier and produce an enriched report: predictions,\n\
                  probabilities, segment breakdowns, top-K ranking and an\n\
                  exportable result file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score an input file with the trained model and export the report.
    Score(ScoreArgs),

    /// Load an input file and print its shape and columns without scoring.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// Input file to score (.csv, .xlsx or .xls).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path to the trained model artifact (JSON).
    #[arg(long = "model", value_name = "PATH")]
    pub model: PathBuf,

    /// Output path for the enriched report
    /// (default: <INPUT stem>_scored.<format>).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Export format for the enriched report.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: ExportFormatArg,

    /// Number of rows in the top ranking by positive probability.
    #[arg(long = "top", value_name = "K", default_value_t = scorebatch_report::DEFAULT_TOP_K)]
    pub top: usize,

    /// Compute and print the report without writing the export file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Input file to inspect (.csv, .xlsx or .xls).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Xlsx,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
