// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the configured commands,
//! using `tokio::process::Command`, and forwarding their output.
//!
//! - [`interpreter`] picks the shell used to run a command line.
//! - [`runner`] starts one child process per `CommandSpec`.
//! - [`multiplex`] drains a child's stdout/stderr into the console.

pub mod interpreter;
pub mod multiplex;
pub mod runner;

pub use interpreter::ShellInterpreter;
pub use multiplex::{drain_stream, OutputMultiplexer, StreamKind};
pub use runner::{ProcessRunner, RunningCommand};
