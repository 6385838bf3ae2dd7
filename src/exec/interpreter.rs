// src/exec/interpreter.rs

//! Host shell interpreter lookup.
//!
//! The process runner never branches on the platform itself; it asks for a
//! [`ShellInterpreter`] and prepends its invocation arguments to the command
//! line.

use std::ffi::OsString;

use tokio::process::Command;

/// Program plus leading arguments used to run a command line through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellInterpreter {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ShellInterpreter {
    pub fn new(program: impl Into<OsString>, args: impl IntoIterator<Item = impl Into<OsString>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `cmd /C` on Windows, `sh -c` elsewhere.
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::new("cmd", ["/C"])
        } else {
            Self::new("sh", ["-c"])
        }
    }

    /// Build an (unspawned) command that runs `command_line` through this shell.
    pub fn command(&self, command_line: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(command_line);
        cmd
    }
}

impl Default for ShellInterpreter {
    fn default() -> Self {
        Self::host()
    }
}
