//! # Sink registry - ordered multiset of active sinks.
//!
//! The registry owns the list of registered sinks and runs their lifecycle
//! hooks:
//! - `register` → `setup()`, then append under the lock
//! - `remove`   → detach first matching instance, then `tear_down()`
//! - `clear`    → detach everything, then `tear_down()` on each
//! - `snapshot` → independent copy used to fix dispatch recipients
//!
//! ## Architecture
//! ```text
//! register(a, b) ─► a.setup() ─► lock ─► push(a) ─► unlock
//!                   b.setup() ─► lock ─► push(b) ─► unlock
//!                   └─► Err(RegistrationError) if any setup failed (after all)
//!
//! remove(a)      ─► lock ─► position(same_sink) ─► Vec::remove ─► unlock ─► a.tear_down()
//! clear()        ─► lock ─► mem::take(Vec)                      ─► unlock ─► tear_down() × n
//! snapshot()     ─► lock ─► Vec::clone                          ─► unlock
//! ```
//!
//! ## Rules
//! - Multiset: the same instance may be registered N times; each registration
//!   is an independent entry and needs its own removal.
//! - Identity: matching is by pointer, never by value.
//! - A sink is appended only after its `setup()` returned, so no snapshot
//!   ever contains a sink whose setup has not finished.
//! - Lifecycle hooks run without the lock held. A sink may log through the
//!   facade (or read the registry) from `setup()` and `tear_down()`; it does
//!   not receive its own setup-time events.
//! - A failing `setup()` (error or panic) still appends the sink; all
//!   failures of one call are returned together once the call is done.

use std::mem;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::error::{RegistrationError, SetupFailure};
use crate::sinks::{Sink, SinkRef, same_sink};

use super::{panic_message, report_failure};

/// Concurrency-safe ordered multiset of active sinks.
pub struct SinkRegistry {
    sinks: Mutex<Vec<SinkRef>>,
    report_failures: AtomicBool,
}

impl SinkRegistry {
    /// Creates an empty registry that reports tear-down panics via `tracing`.
    pub fn new() -> Self {
        Self {
            sinks: Mutex::new(Vec::new()),
            report_failures: AtomicBool::new(true),
        }
    }

    /// Enables or disables diagnostics for isolated tear-down panics.
    #[must_use]
    pub fn with_failure_reporting(self, enabled: bool) -> Self {
        self.set_failure_reporting(enabled);
        self
    }

    /// Same as [`with_failure_reporting`](Self::with_failure_reporting) on a
    /// registry that is already shared.
    pub fn set_failure_reporting(&self, enabled: bool) {
        self.report_failures.store(enabled, Ordering::Relaxed);
    }

    /// Whether isolated tear-down panics are reported via `tracing`.
    pub fn reports_failures(&self) -> bool {
        self.report_failures.load(Ordering::Relaxed)
    }

    /// Registers one sink.
    pub fn register(&self, sink: SinkRef) -> Result<(), RegistrationError> {
        self.register_all([sink])
    }

    /// Registers every sink, in iteration order.
    ///
    /// Each sink is set up and then appended before the next one is looked
    /// at. Setup failures do not stop the call; they are returned together at
    /// the end and the failing sinks stay registered.
    pub fn register_all<I>(&self, sinks: I) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = SinkRef>,
    {
        let mut failures = Vec::new();

        for (position, sink) in sinks.into_iter().enumerate() {
            let reason = match catch_unwind(AssertUnwindSafe(|| sink.setup())) {
                Ok(Ok(())) => None,
                Ok(Err(err)) => Some(err.to_string()),
                Err(panic) => Some(format!("setup panicked: {}", panic_message(&*panic))),
            };
            self.sinks.lock().push(Arc::clone(&sink));

            if let Some(reason) = reason {
                failures.push(SetupFailure {
                    sink: sink.name(),
                    position,
                    reason,
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RegistrationError::new(failures))
        }
    }

    /// Removes one registration of `sink` and tears it down.
    ///
    /// Returns `false` (and does nothing) if the instance is not registered.
    pub fn remove<S>(&self, sink: &Arc<S>) -> bool
    where
        S: Sink + ?Sized,
    {
        let removed = {
            let mut guard = self.sinks.lock();
            guard
                .iter()
                .position(|s| same_sink(s, sink))
                .map(|idx| guard.remove(idx))
        };

        match removed {
            Some(s) => {
                self.tear_down(&s);
                true
            }
            None => false,
        }
    }

    /// Removes every registration and tears each one down.
    ///
    /// Returns how many registrations were removed.
    pub fn clear(&self) -> usize {
        let drained = mem::take(&mut *self.sinks.lock());
        for s in &drained {
            self.tear_down(s);
        }
        drained.len()
    }

    /// Independent copy of the current registrations, in registration order.
    pub fn snapshot(&self) -> Vec<SinkRef> {
        self.sinks.lock().clone()
    }

    /// Number of registrations.
    pub fn count(&self) -> usize {
        self.sinks.lock().len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.sinks.lock().is_empty()
    }

    /// How many times `sink` is currently registered.
    pub fn occurrences<S>(&self, sink: &Arc<S>) -> usize
    where
        S: Sink + ?Sized,
    {
        self.sinks
            .lock()
            .iter()
            .filter(|s| same_sink(*s, sink))
            .count()
    }

    /// True if `sink` is registered at least once.
    pub fn contains<S>(&self, sink: &Arc<S>) -> bool
    where
        S: Sink + ?Sized,
    {
        self.sinks.lock().iter().any(|s| same_sink(s, sink))
    }

    fn tear_down(&self, sink: &SinkRef) {
        if let Err(panic) = catch_unwind(AssertUnwindSafe(|| sink.tear_down())) {
            if self.reports_failures() {
                report_failure(sink.name(), "tear_down", &panic_message(&*panic));
            }
        }
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = self.sinks.lock().iter().map(|s| s.name()).collect();
        f.debug_struct("SinkRegistry").field("sinks", &names).finish()
    }
}
