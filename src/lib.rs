// src/lib.rs

pub mod cli;
pub mod config;
pub mod console;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, write_starter_config, ConfigFile};
use crate::console::{format, ConsoleSink, SharedSink, StdoutSink};
use crate::engine::{spawn_interrupt_listener, Orchestrator};
use crate::exec::ProcessRunner;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - `--init` (write a starter config and stop)
/// - config loading
/// - banner + command listing
/// - Ctrl-C / SIGTERM handling
/// - the orchestrator
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);

    if args.init {
        write_starter_config(&config_path, args.force)?;
        println!("Creating a new xrun configuration");
        info!(path = %config_path.display(), "wrote starter config");
        return Ok(());
    }

    let cfg = load_and_validate(&config_path)?;
    let sink: SharedSink = Arc::new(StdoutSink);

    print_preamble(&cfg, sink.as_ref(), !args.no_banner);

    if args.dry_run {
        debug!("dry-run complete (no execution)");
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let listener = spawn_interrupt_listener(shutdown.clone())
        .context("installing interrupt handlers")?;

    let orchestrator = Orchestrator::new(
        cfg.into_commands(),
        ProcessRunner::default(),
        sink,
        shutdown,
    );
    let report = orchestrator.run().await;
    listener.abort();

    debug!(?report, "run complete");
    Ok(())
}

/// Banner (optional) followed by the configured command listing.
fn print_preamble(cfg: &ConfigFile, sink: &dyn ConsoleSink, banner: bool) {
    if banner {
        sink.write_line(&format::banner());
    }
    for line in format::command_listing(cfg.commands()) {
        sink.write_line(&line);
    }
}
