// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `runprog`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runprog",
    version,
    about = "Run research programs and collect their output in a shared build log.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNPROG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// TOML file merged over the built-in metadata table.
    #[arg(long, value_name = "PATH", global = true)]
    pub metadata: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create (or truncate) the makelog. Must run before any `run`.
    Start {
        /// Defaults to `settings.makelog` from the metadata table.
        #[arg(long, value_name = "PATH")]
        makelog: Option<PathBuf>,
    },

    /// Run one program and append its output to the makelog.
    Run(RunArgs),

    /// Write the closing footer to the makelog.
    End {
        #[arg(long, value_name = "PATH")]
        makelog: Option<PathBuf>,
    },

    /// Print the effective metadata table.
    ShowMetadata,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Application key in the metadata table (stata, matlab, perl, python,
    /// math, st, lyx, r, sas, ...).
    #[arg(long, value_name = "NAME")]
    pub application: String,

    /// Program file to run.
    #[arg(long, value_name = "PATH")]
    pub program: PathBuf,

    /// Executable; defaults to the metadata table entry for the OS.
    #[arg(long, value_name = "CMD")]
    pub executable: Option<String>,

    /// Option string; defaults to the metadata table entry for the OS.
    #[arg(long, value_name = "OPTS", allow_hyphen_values = true)]
    pub option: Option<String>,

    /// Trailing arguments passed after the program.
    #[arg(long, value_name = "ARGS", default_value = "", allow_hyphen_values = true)]
    pub args: String,

    /// Makelog to append to; defaults to `settings.makelog`.
    #[arg(long, value_name = "PATH", conflicts_with = "no_makelog")]
    pub makelog: Option<PathBuf>,

    /// Do not write to any makelog.
    #[arg(long)]
    pub no_makelog: bool,

    /// Independent log, overwritten with this run's output.
    #[arg(long, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Run the command through the platform shell.
    #[arg(long)]
    pub shell: bool,

    /// Target system, "posix" or "nt"; defaults to the host.
    #[arg(long, value_name = "OS")]
    pub os: Option<String>,

    /// SAS only: where the listing file goes.
    #[arg(long, value_name = "PATH")]
    pub lst: Option<PathBuf>,

    /// LyX only: "handout", "comments", or empty.
    #[arg(long, value_name = "TYPE", default_value = "")]
    pub doctype: String,

    /// LyX only: directory for the exported PDF.
    #[arg(long, value_name = "DIR")]
    pub pdfout: Option<PathBuf>,

    /// Validate and print the command, but don't execute or log anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
