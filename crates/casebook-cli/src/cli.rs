//! CLI argument definitions for the casebook tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "casebook",
    version,
    about = "Casebook - Inspect and audit simulated patient cases",
    long_about = "Inspect, list, and audit simulated patient case exports.\n\n\
                  Groups flat legacy field data into display modules, reads the\n\
                  structured v2 layout as-is, and reports anything a reviewer\n\
                  should look at before a training run."
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

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

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

    /// Print patient field values instead of redacting them.
    ///
    /// Case fields are treated as PHI: tables show [REDACTED] in place of
    /// values unless this flag is set.
    #[arg(long = "show-values", global = true)]
    pub show_values: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify one case export and show its module buckets.
    Inspect(InspectArgs),

    /// List the cases in a store directory.
    List(ListArgs),

    /// Audit a store directory and report findings.
    Report(ReportArgs),

    /// Show the effective session configuration.
    Features(FeaturesArgs),
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Path to a case export file (.json).
    #[arg(value_name = "CASE_FILE")]
    pub case_file: PathBuf,

    /// Print the classification as JSON instead of tables.
    ///
    /// JSON output carries the real field values regardless of
    /// --show-values; it is the machine form of the file you passed in.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Directory holding one JSON file per case.
    #[arg(value_name = "CASE_DIR")]
    pub case_dir: PathBuf,

    /// Print the case list as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Directory holding one JSON file per case.
    #[arg(value_name = "CASE_DIR")]
    pub case_dir: PathBuf,

    /// Print the audit report as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct FeaturesArgs {
    /// Settings file to overlay on the defaults.
    #[arg(long = "store", value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Print the configuration as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
