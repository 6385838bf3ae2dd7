#![allow(dead_code)]

pub use xrun_test_utils::builders;
pub use xrun_test_utils::{init_tracing, with_timeout, RecordingSink};

use tokio_util::sync::CancellationToken;
use xrun::config::CommandSpec;
use xrun::engine::Orchestrator;
use xrun::exec::ProcessRunner;

/// Orchestrator over `specs` writing into `sink`, using the host shell.
pub fn orchestrator(specs: Vec<CommandSpec>, sink: &RecordingSink) -> Orchestrator {
    orchestrator_with(specs, sink, ProcessRunner::default(), CancellationToken::new())
}

pub fn orchestrator_with(
    specs: Vec<CommandSpec>,
    sink: &RecordingSink,
    runner: ProcessRunner,
    shutdown: CancellationToken,
) -> Orchestrator {
    Orchestrator::new(specs, runner, sink.shared(), shutdown)
}
