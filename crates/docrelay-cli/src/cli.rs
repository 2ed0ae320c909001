//! CLI argument definitions for docrelay.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "docrelay",
    version,
    about = "Migrate legacy document-repository records to a research archive",
    long_about = "Migrate bibliographic records from a legacy document repository into a\n\
                  research-data archive: fetch a record's JSON export, transform its\n\
                  metadata to the archive's deposit schema, create a draft deposit, push\n\
                  metadata and files, and roll back partially created remote state on\n\
                  failure. Every attempt is appended to the audit log."
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

    /// Path to the migration configuration file.
    #[arg(
        long = "config",
        value_name = "PATH",
        default_value = "docrelay.toml",
        global = true
    )]
    pub config: PathBuf,

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
}

#[derive(Subcommand)]
pub enum Command {
    /// Transfer a single record by its legacy id.
    Transfer(TransferArgs),

    /// Transfer every valid record with an id in [START, END).
    Batch(BatchArgs),

    /// Delete every draft deposit on the archive (environment reset).
    Reset,
}

#[derive(Parser)]
pub struct TransferArgs {
    /// Legacy id of the record to transfer.
    #[arg(value_name = "LEGACY_ID")]
    pub legacy_id: u64,

    /// Publish the deposit after a completed transfer and record the
    /// assigned identifier in the DOI cross-reference store.
    #[arg(long = "publish")]
    pub publish: bool,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// First legacy id of the range (inclusive).
    #[arg(value_name = "START")]
    pub start: u64,

    /// End of the range (exclusive).
    #[arg(value_name = "END")]
    pub end: u64,

    /// Publish each deposit after a completed transfer.
    #[arg(long = "publish")]
    pub publish: bool,
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
