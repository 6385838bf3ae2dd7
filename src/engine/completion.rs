// src/engine/completion.rs

//! Shared registry of outstanding work.
//!
//! Every process-wait and every stream drain holds a [`CompletionGuard`] for
//! as long as it runs. The set starts *open*: the open state itself counts as
//! one outstanding entry, so the count cannot hit zero while the orchestrator
//! is still launching commands. Once [`CompletionSet::close`] has been called
//! and the last guard is dropped, the count reaches zero exactly once and every
//! [`CompletionSet::wait`] call returns.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug)]
struct Inner {
    outstanding: AtomicUsize,
    closed: AtomicBool,
    notify: Notify,
}

impl Inner {
    fn release(&self) {
        let prev = self.outstanding.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(prev > 0, "completion set released below zero");
        if prev == 1 {
            self.notify.notify_waiters();
        }
    }
}

/// Cloneable handle to a completion counter.
#[derive(Debug, Clone)]
pub struct CompletionSet {
    inner: Arc<Inner>,
}

impl Default for CompletionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionSet {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                outstanding: AtomicUsize::new(1),
                closed: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    /// Register one unit of work. It is deregistered when the guard drops.
    ///
    /// Registering after the set has completed is a logic error; the returned
    /// guard is still balanced but `wait` will not observe it.
    pub fn register(&self) -> CompletionGuard {
        let prev = self.inner.outstanding.fetch_add(1, Ordering::AcqRel);
        debug_assert!(prev > 0, "registered into a completed set");
        CompletionGuard {
            inner: Some(Arc::clone(&self.inner)),
        }
    }

    /// Stop accepting the launch phase's implicit entry. Idempotent.
    pub fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::AcqRel) {
            self.inner.release();
        }
    }

    /// Registered guards still alive (the open state is not counted).
    pub fn outstanding(&self) -> usize {
        let raw = self.inner.outstanding.load(Ordering::Acquire);
        if self.inner.closed.load(Ordering::Acquire) {
            raw
        } else {
            raw.saturating_sub(1)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.inner.outstanding.load(Ordering::Acquire) == 0
    }

    /// Wait until the set is closed and every guard has been dropped.
    pub async fn wait(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            // Enable before checking so a release between the check and the
            // await still wakes us.
            notified.as_mut().enable();

            if self.is_complete() {
                return;
            }
            notified.await;
        }
    }
}

/// Proof of one outstanding unit of work in a [`CompletionSet`].
#[derive(Debug)]
#[must_use = "dropping the guard deregisters the work immediately"]
pub struct CompletionGuard {
    inner: Option<Arc<Inner>>,
}

impl CompletionGuard {
    /// Deregister now instead of at drop.
    pub fn complete(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(inner) = self.inner.take() {
            inner.release();
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.release();
    }
}
