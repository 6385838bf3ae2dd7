// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::config::loader::DEFAULT_CONFIG_FILE;

/// Command-line arguments for `xrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "xrun",
    version,
    about = "Run several shell commands at once with labeled, colored output.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (JSON, or TOML when it ends in `.toml`).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Write a starter config file and exit.
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing config file when used with `--init`.
    #[arg(long, requires = "init")]
    pub force: bool,

    /// Parse + validate, list the commands, but don't start any of them.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the ASCII-art banner.
    #[arg(long)]
    pub no_banner: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `XRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
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
