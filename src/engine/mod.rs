// src/engine/mod.rs

//! Concurrent execution engine for xrun.
//!
//! This module ties together:
//! - the completion set tracking every process wait and stream drain
//! - the orchestrator that launches all commands and waits for them
//! - the shutdown coordinator reacting to interrupts
//!
//! The process and stream plumbing itself lives in [`crate::exec`].

pub mod completion;
pub mod orchestrator;
pub mod shutdown;

pub use completion::{CompletionGuard, CompletionSet};
pub use orchestrator::{Orchestrator, RunReport};
pub use shutdown::{spawn_interrupt_listener, InterruptSignals, ShutdownCoordinator, ShutdownState};
