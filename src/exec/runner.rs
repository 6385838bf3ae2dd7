// src/exec/runner.rs

//! Starting one child process per command.

use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};
use tokio::process::{Child, ChildStderr, ChildStdout};
use tracing::{error, info};

use crate::config::CommandSpec;
use crate::console::format::{starting_notice, startup_failure};
use crate::console::SharedSink;
use crate::exec::interpreter::ShellInterpreter;

/// Starts commands through a shell interpreter.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    interpreter: ShellInterpreter,
}

impl ProcessRunner {
    pub fn new(interpreter: ShellInterpreter) -> Self {
        Self { interpreter }
    }

    pub fn interpreter(&self) -> &ShellInterpreter {
        &self.interpreter
    }

    /// Start `spec` and announce it on `sink`.
    ///
    /// On failure the error is reported on `sink`, tagged with the command's
    /// label, and also returned. Nothing is retried.
    pub fn start(&self, spec: &CommandSpec, sink: &SharedSink) -> Result<RunningCommand> {
        match self.spawn(spec) {
            Ok(running) => {
                sink.write_line(&starting_notice(spec));
                Ok(running)
            }
            Err(err) => {
                error!(command = %spec.label, error = %format!("{err:#}"), "command failed to start");
                sink.write_line(&startup_failure(spec, &err.root_cause()));
                Err(err)
            }
        }
    }

    fn spawn(&self, spec: &CommandSpec) -> Result<RunningCommand> {
        info!(
            command = %spec.label,
            cmd = %spec.command_line,
            cwd = %spec.working_dir.display(),
            "starting command process"
        );

        let mut cmd = self.interpreter.command(&spec.command_line);
        cmd.current_dir(&spec.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning process for command '{}'", spec.label))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        Ok(RunningCommand {
            label: spec.label.clone(),
            child,
            stdout,
            stderr,
        })
    }
}

/// A live child process plus its not-yet-consumed output pipes.
#[derive(Debug)]
pub struct RunningCommand {
    label: String,
    child: Child,
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
}

impl RunningCommand {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.stdout.take()
    }

    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.stderr.take()
    }

    /// Wait for the process to exit.
    pub async fn wait(mut self) -> Result<ExitStatus> {
        self.child
            .wait()
            .await
            .with_context(|| format!("waiting for process of command '{}'", self.label))
    }
}
