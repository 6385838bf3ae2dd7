// src/engine/shutdown.rs

//! Interrupt handling.
//!
//! [`spawn_interrupt_listener`] turns Ctrl-C (and SIGTERM on Unix) into a
//! cancelled [`CancellationToken`]. The [`ShutdownCoordinator`] watches that
//! token, prints the stopping notice once, and then waits for the same
//! [`CompletionSet`] as the orchestrator.
//!
//! Child processes are never signalled from here. An interrupt typed at the
//! terminal already reaches them through the foreground process group; a
//! command that ignores it keeps xrun alive until it exits on its own.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::console::format::INTERRUPT_NOTICE;
use crate::console::SharedSink;
use crate::engine::completion::CompletionSet;

/// Lifecycle of the shutdown coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    /// Waiting for an interrupt.
    Listening,
    /// Interrupt received; waiting for commands to finish.
    Triggered,
    /// All commands finished after an interrupt.
    Terminated,
}

/// Watches the shutdown token on behalf of the orchestrator.
pub struct ShutdownCoordinator {
    token: CancellationToken,
    completion: CompletionSet,
    sink: SharedSink,
    state_tx: watch::Sender<ShutdownState>,
}

impl ShutdownCoordinator {
    pub fn new(token: CancellationToken, completion: CompletionSet, sink: SharedSink) -> Self {
        let (state_tx, _) = watch::channel(ShutdownState::Listening);
        Self {
            token,
            completion,
            sink,
            state_tx,
        }
    }

    /// Observe state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ShutdownState> {
        self.state_tx.subscribe()
    }

    /// Run until either the work finishes without an interrupt, or an
    /// interrupt arrives and the work finishes afterwards.
    ///
    /// Returns `true` if an interrupt was observed.
    pub async fn run(self) -> bool {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {}
            _ = self.completion.wait() => {
                debug!("all commands finished without an interrupt");
                return false;
            }
        }

        info!("interrupt received; waiting for commands to exit");
        self.state_tx.send_replace(ShutdownState::Triggered);
        self.sink.write_line(INTERRUPT_NOTICE);

        self.completion.wait().await;

        info!("all commands exited after interrupt");
        self.state_tx.send_replace(ShutdownState::Terminated);
        true
    }

    pub fn spawn(self) -> JoinHandle<bool> {
        tokio::spawn(self.run())
    }
}

/// Process-wide interrupt handlers, registered when constructed.
///
/// On Unix this is SIGINT plus SIGTERM; elsewhere Ctrl-C. Once installed the
/// default "terminate the process" action no longer applies to these signals.
pub struct InterruptSignals {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
    #[cfg(windows)]
    ctrl_c: tokio::signal::windows::CtrlC,
}

impl InterruptSignals {
    /// Register the handlers. Must be called from within a Tokio runtime.
    pub fn install() -> std::io::Result<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            Ok(Self {
                interrupt: signal(SignalKind::interrupt())?,
                terminate: signal(SignalKind::terminate())?,
            })
        }

        #[cfg(windows)]
        {
            Ok(Self {
                ctrl_c: tokio::signal::windows::ctrl_c()?,
            })
        }
    }

    /// Wait for the next interrupt. `None` once the signal streams are closed.
    async fn recv(&mut self) -> Option<&'static str> {
        #[cfg(unix)]
        {
            tokio::select! {
                got = self.interrupt.recv() => got.map(|_| "SIGINT"),
                got = self.terminate.recv() => got.map(|_| "SIGTERM"),
            }
        }

        #[cfg(windows)]
        {
            self.ctrl_c.recv().await.map(|_| "Ctrl-C")
        }
    }

    /// Cancel `token` on the first interrupt.
    ///
    /// The task keeps running afterwards so repeated interrupts are absorbed
    /// (and logged) instead of killing xrun while commands are still draining.
    pub fn spawn(mut self, token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut first = true;
            while let Some(signal) = self.recv().await {
                if first {
                    first = false;
                    info!(signal, "interrupt received");
                    token.cancel();
                } else {
                    debug!(signal, "interrupt already received; still waiting for commands to exit");
                }
            }
            warn!("interrupt signal stream closed");
        })
    }
}

/// Install the interrupt handlers now and spawn the task that cancels `token`.
///
/// Registration happens before this returns, so a signal arriving before the
/// task is first polled is still delivered to it.
pub fn spawn_interrupt_listener(token: CancellationToken) -> std::io::Result<JoinHandle<()>> {
    Ok(InterruptSignals::install()?.spawn(token))
}
