//! # Dispatcher: synchronous fan-out to every eligible sink.
//!
//! [`Dispatcher::dispatch`] routes one event to every sink in a registry
//! snapshot, in registration order, on the calling thread.
//!
//! ## What it guarantees
//! - Recipients are fixed when the call starts (snapshot); concurrent
//!   registration or removal does not change them mid-call.
//! - `log()` is only called when `is_loggable()` returned `true`.
//! - The call returns after every sink in the snapshot has been visited.
//! - A sink that panics or returns an error does not stop delivery to the
//!   sinks after it, and nothing propagates to the caller.
//!
//! ## What it does **not** guarantee
//! - No ordering across concurrent dispatches. Sinks may see `log()` from
//!   several threads at once.
//! - No timeout: a blocking sink blocks the caller.
//!
//! ## Diagram
//! ```text
//!    dispatch(sev, tag, msg, err)
//!        │  snapshot()
//!        ├──► S1: is_loggable? ── yes ──► log()      delivered
//!        ├──► S2: is_loggable? ── no                 filtered
//!        ├──► S3: is_loggable? ── yes ──► log() ✗    failed (isolated)
//!        └──► S4: is_loggable? ── yes ──► log()      delivered
//! ```
//!
//! ## Panic handling
//! `is_loggable` and `log` run inside `catch_unwind`.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave a sink's internal
//! state inconsistent if it panics while holding its own lock.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::severity::Severity;
use crate::sinks::{ErrorRef, Sink};

use super::registry::SinkRegistry;
use super::{panic_message, report_failure};

/// Outcome counters of one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Sinks in the snapshot.
    pub visited: usize,
    /// Sinks whose `log()` completed successfully.
    pub delivered: usize,
    /// Sinks whose `is_loggable()` returned `false`.
    pub filtered: usize,
    /// Sinks that panicked or returned an error.
    pub failed: usize,
}

impl DispatchReport {
    /// True if the snapshot was empty.
    pub fn is_noop(&self) -> bool {
        self.visited == 0
    }
}

enum Delivery {
    Delivered,
    Filtered,
    Failed {
        stage: &'static str,
        reason: String,
    },
}

/// Fan-out over a shared [`SinkRegistry`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<SinkRegistry>,
    report_failures: bool,
}

impl Dispatcher {
    /// Creates a dispatcher reading from `registry`.
    pub fn new(registry: Arc<SinkRegistry>) -> Self {
        Self {
            registry,
            report_failures: true,
        }
    }

    /// Enables or disables diagnostics for isolated sink failures.
    #[must_use]
    pub fn with_failure_reporting(mut self, enabled: bool) -> Self {
        self.report_failures = enabled;
        self
    }

    pub fn registry(&self) -> &Arc<SinkRegistry> {
        &self.registry
    }

    /// Delivers one event to every eligible sink.
    ///
    /// # Parameters
    /// - `severity`: event level
    /// - `tag`: resolved tag
    /// - `message`: event text
    /// - `error`: optional error, passed by reference to every sink
    pub fn dispatch(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        error: Option<&ErrorRef>,
    ) -> DispatchReport {
        let recipients = self.registry.snapshot();
        let mut report = DispatchReport {
            visited: recipients.len(),
            ..DispatchReport::default()
        };

        for sink in &recipients {
            match deliver(&**sink, severity, tag, message, error) {
                Delivery::Delivered => report.delivered += 1,
                Delivery::Filtered => report.filtered += 1,
                Delivery::Failed { stage, reason } => {
                    report.failed += 1;
                    if self.report_failures {
                        report_failure(sink.name(), stage, &reason);
                    }
                }
            }
        }
        report
    }
}

/// One sink, one event, behind an isolation boundary.
fn deliver(
    sink: &dyn Sink,
    severity: Severity,
    tag: &str,
    message: &str,
    error: Option<&ErrorRef>,
) -> Delivery {
    match catch_unwind(AssertUnwindSafe(|| sink.is_loggable(Some(tag), severity))) {
        Ok(true) => {}
        Ok(false) => return Delivery::Filtered,
        Err(panic) => {
            return Delivery::Failed {
                stage: "is_loggable",
                reason: panic_message(&*panic),
            };
        }
    }

    match catch_unwind(AssertUnwindSafe(|| sink.log(severity, tag, message, error))) {
        Ok(Ok(())) => Delivery::Delivered,
        Ok(Err(err)) => Delivery::Failed {
            stage: "log",
            reason: err.to_string(),
        },
        Err(panic) => Delivery::Failed {
            stage: "log",
            reason: panic_message(&*panic),
        },
    }
}
