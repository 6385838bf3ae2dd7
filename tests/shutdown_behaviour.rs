// tests/shutdown_behaviour.rs
#![cfg(unix)]

mod common;
use crate::common::builders::CommandBuilder;
use crate::common::{init_tracing, orchestrator_with, with_timeout, RecordingSink};

use std::error::Error;
use std::process::Command;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use xrun::console::format::INTERRUPT_NOTICE;
use xrun::engine::{spawn_interrupt_listener, ShutdownState};
use xrun::exec::ProcessRunner;

type TestResult = Result<(), Box<dyn Error>>;

fn notice_count(sink: &RecordingSink) -> usize {
    sink.lines().iter().filter(|l| *l == INTERRUPT_NOTICE).count()
}

// Blocking on purpose: on the current-thread test runtime no other task is
// polled until the signal has been delivered.
fn sigterm_self() -> Result<(), Box<dyn Error>> {
    let status = Command::new("kill")
        .args(["-TERM", &std::process::id().to_string()])
        .status()?;
    if !status.success() {
        return Err(format!("kill exited with {status}").into());
    }
    Ok(())
}

#[tokio::test]
async fn interrupt_waits_for_voluntary_exit() -> TestResult {
    init_tracing();

    let sink = RecordingSink::new();
    let token = CancellationToken::new();
    let orch = orchestrator_with(
        vec![CommandBuilder::new("long", "sleep 1; echo finished").spec()],
        &sink,
        ProcessRunner::default(),
        token.clone(),
    );
    let mut state = orch.shutdown_state();
    assert_eq!(*state.borrow(), ShutdownState::Listening);

    let run = tokio::spawn(orch.run());

    tokio::time::sleep(Duration::from_millis(100)).await;
    token.cancel();
    with_timeout(state.wait_for(|s| *s == ShutdownState::Triggered)).await?;

    // The interrupt does not terminate the child; the run is still going.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!run.is_finished(), "run must wait for the command to exit");
    assert_eq!(notice_count(&sink), 1);

    let report = with_timeout(run).await?;
    assert!(report.interrupted);
    assert_eq!(*state.borrow(), ShutdownState::Terminated);

    // The command ran to completion and its last line was drained.
    assert_eq!(sink.output_of("long"), vec!["finished".to_string()]);
    assert_eq!(notice_count(&sink), 1);
    Ok(())
}

#[tokio::test]
async fn repeated_interrupts_print_one_notice() -> TestResult {
    init_tracing();

    let sink = RecordingSink::new();
    let token = CancellationToken::new();
    let orch = orchestrator_with(
        vec![CommandBuilder::new("A", "sleep 0.3").spec()],
        &sink,
        ProcessRunner::default(),
        token.clone(),
    );
    let run = tokio::spawn(orch.run());

    tokio::time::sleep(Duration::from_millis(50)).await;
    token.cancel();
    token.cancel();
    tokio::time::sleep(Duration::from_millis(20)).await;
    token.cancel();

    let report = with_timeout(run).await?;
    assert!(report.interrupted);
    assert_eq!(notice_count(&sink), 1);
    Ok(())
}

#[tokio::test]
async fn interrupt_before_run_still_drains_everything() -> TestResult {
    init_tracing();

    let sink = RecordingSink::new();
    let token = CancellationToken::new();
    token.cancel();

    let orch = orchestrator_with(
        vec![
            CommandBuilder::new("A", "echo a1; echo a2").spec(),
            CommandBuilder::new("B", "echo b1").spec(),
        ],
        &sink,
        ProcessRunner::default(),
        token,
    );
    let report = with_timeout(orch.run()).await;

    assert!(report.interrupted);
    assert_eq!(report.started, 2);
    assert_eq!(sink.output_of("A"), vec!["a1".to_string(), "a2".to_string()]);
    assert_eq!(sink.output_of("B"), vec!["b1".to_string()]);
    assert_eq!(notice_count(&sink), 1);
    Ok(())
}

#[tokio::test]
async fn no_interrupt_means_no_notice() -> TestResult {
    init_tracing();

    let sink = RecordingSink::new();
    let orch = orchestrator_with(
        vec![CommandBuilder::new("A", "echo done").spec()],
        &sink,
        ProcessRunner::default(),
        CancellationToken::new(),
    );
    let state = orch.shutdown_state();

    let report = with_timeout(orch.run()).await;

    assert!(!report.interrupted);
    assert_eq!(notice_count(&sink), 0);
    assert_eq!(*state.borrow(), ShutdownState::Listening);
    Ok(())
}

#[tokio::test]
async fn sigterm_before_listener_is_polled_is_not_lost() -> TestResult {
    init_tracing();

    let token = CancellationToken::new();
    let listener = spawn_interrupt_listener(token.clone())?;
    sigterm_self()?;

    with_timeout(token.cancelled()).await;
    listener.abort();
    Ok(())
}

#[tokio::test]
async fn sigterm_mid_run_prints_one_notice_and_waits_for_exit() -> TestResult {
    init_tracing();

    let sink = RecordingSink::new();
    let token = CancellationToken::new();
    let listener = spawn_interrupt_listener(token.clone())?;
    let orch = orchestrator_with(
        vec![CommandBuilder::new("long", "sleep 1; echo fin").spec()],
        &sink,
        ProcessRunner::default(),
        token.clone(),
    );
    let state = orch.shutdown_state();

    let started = Instant::now();
    let run = tokio::spawn(orch.run());

    tokio::time::sleep(Duration::from_millis(100)).await;
    sigterm_self()?;
    with_timeout(token.cancelled()).await;

    // A second interrupt is absorbed by the listener.
    sigterm_self()?;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!run.is_finished(), "run must wait for the command to exit");

    let report = with_timeout(run).await?;
    assert!(started.elapsed() >= Duration::from_millis(900));
    assert!(report.interrupted);
    assert_eq!(*state.borrow(), ShutdownState::Terminated);
    assert_eq!(notice_count(&sink), 1);
    assert_eq!(sink.output_of("long"), vec!["fin".to_string()]);

    listener.abort();
    Ok(())
}
