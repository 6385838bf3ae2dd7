// src/engine/orchestrator.rs

use std::fmt;
use std::process::ExitStatus;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::CommandSpec;
use crate::console::SharedSink;
use crate::engine::completion::{CompletionGuard, CompletionSet};
use crate::engine::shutdown::{ShutdownCoordinator, ShutdownState};
use crate::exec::{OutputMultiplexer, ProcessRunner, RunningCommand, StreamKind};

/// What happened during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Commands whose process was created.
    pub started: usize,
    /// Commands that could not be started.
    pub failed_to_start: usize,
    /// Whether an interrupt was received before the run completed.
    pub interrupted: bool,
}

/// Starts every command, drains their output, and returns once all of them
/// have exited and every line has been written to the console.
pub struct Orchestrator {
    commands: Vec<CommandSpec>,
    runner: ProcessRunner,
    sink: SharedSink,
    completion: CompletionSet,
    shutdown: CancellationToken,
    coordinator: ShutdownCoordinator,
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("commands", &self.commands)
            .field("runner", &self.runner)
            .field("completion", &self.completion)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    pub fn new(
        commands: Vec<CommandSpec>,
        runner: ProcessRunner,
        sink: SharedSink,
        shutdown: CancellationToken,
    ) -> Self {
        let completion = CompletionSet::new();
        let coordinator =
            ShutdownCoordinator::new(shutdown.clone(), completion.clone(), sink.clone());
        Self {
            commands,
            runner,
            sink,
            completion,
            shutdown,
            coordinator,
        }
    }

    /// Handle to the completion set, e.g. to inspect outstanding work.
    pub fn completion(&self) -> CompletionSet {
        self.completion.clone()
    }

    /// Observe the shutdown coordinator's state.
    pub fn shutdown_state(&self) -> watch::Receiver<ShutdownState> {
        self.coordinator.subscribe()
    }

    /// Run every command to completion.
    ///
    /// Per-command failures are reported on the console and never returned.
    pub async fn run(self) -> RunReport {
        let Orchestrator {
            commands,
            runner,
            sink,
            completion,
            shutdown,
            coordinator,
        } = self;
        let coordinator = coordinator.spawn();
        let launcher = Launcher {
            runner: &runner,
            sink: &sink,
            completion: &completion,
        };

        let mut report = RunReport::default();
        for spec in &commands {
            if launcher.launch(spec) {
                report.started += 1;
            } else {
                report.failed_to_start += 1;
            }
        }
        completion.close();
        info!(
            started = report.started,
            failed = report.failed_to_start,
            outstanding = completion.outstanding(),
            "all commands launched; waiting for completion"
        );

        completion.wait().await;

        report.interrupted = match coordinator.await {
            Ok(interrupted) => interrupted,
            Err(e) => {
                warn!(error = %e, "shutdown coordinator task failed");
                shutdown.is_cancelled()
            }
        };

        info!(?report, "all commands finished");
        report
    }
}

struct Launcher<'a> {
    runner: &'a ProcessRunner,
    sink: &'a SharedSink,
    completion: &'a CompletionSet,
}

impl Launcher<'_> {
    /// Start one command and register its process wait plus both drains.
    ///
    /// Returns `false` if the process could not be started; in that case
    /// nothing stays registered for it.
    fn launch(&self, spec: &CommandSpec) -> bool {
        let wait_guard = self.completion.register();

        let mut running = match self.runner.start(spec, self.sink) {
            Ok(running) => running,
            Err(_) => return false,
        };

        let mux = OutputMultiplexer::new(spec, self.sink.clone());
        if let Some(stdout) = running.take_stdout() {
            mux.spawn_drain(StreamKind::Stdout, stdout, self.completion.register());
        }
        if let Some(stderr) = running.take_stderr() {
            mux.spawn_drain(StreamKind::Stderr, stderr, self.completion.register());
        }

        tokio::spawn(wait_for_exit(running, wait_guard));
        true
    }
}

async fn wait_for_exit(running: RunningCommand, guard: CompletionGuard) {
    let label = running.label().to_string();
    debug!(command = %label, pid = ?running.id(), "waiting for command to exit");

    match running.wait().await {
        Ok(status) => log_exit(&label, status),
        Err(err) => {
            warn!(command = %label, error = %format!("{err:#}"), "failed waiting for command");
        }
    }
    guard.complete();
}

fn log_exit(label: &str, status: ExitStatus) {
    let code = status.code().unwrap_or(-1);
    info!(
        command = %label,
        exit_code = code,
        success = status.success(),
        "command process exited"
    );
}
