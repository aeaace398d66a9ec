//! Error types used by the registry and by sinks.
//!
//! - [`SinkError`]: raised by an individual sink (setup or write failure).
//! - [`RegistrationError`]: aggregate of every setup failure seen during one
//!   registration call.
//! - [`ParseSeverityError`]: unknown severity name.
//!
//! Logging calls never surface errors to the caller; sink failures during
//! dispatch are isolated and only show up in a [`DispatchReport`](crate::DispatchReport)
//! and in diagnostics.

use std::fmt::Write as _;

use thiserror::Error;

/// # Errors produced by a sink.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SinkError {
    /// The sink could not acquire what it needs to start consuming events.
    #[error("sink '{sink}' failed to set up: {reason}")]
    Setup {
        /// Name of the failing sink.
        sink: &'static str,
        /// Human-readable cause.
        reason: String,
    },

    /// Rendering succeeded but the underlying writer failed.
    #[error("sink '{sink}' failed to write: {source}")]
    Write {
        /// Name of the failing sink.
        sink: &'static str,
        /// The I/O error returned by the writer.
        #[source]
        source: std::io::Error,
    },

    /// The sink refused an event it had declared loggable.
    #[error("sink '{sink}' rejected event: {reason}")]
    Rejected {
        /// Name of the failing sink.
        sink: &'static str,
        /// Human-readable cause.
        reason: String,
    },
}

impl SinkError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use cedar_logging::SinkError;
    ///
    /// let err = SinkError::Setup { sink: "console", reason: "no tty".into() };
    /// assert_eq!(err.as_label(), "sink_setup");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SinkError::Setup { .. } => "sink_setup",
            SinkError::Write { .. } => "sink_write",
            SinkError::Rejected { .. } => "sink_rejected",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SinkError::Setup { reason, .. } => format!("setup: {reason}"),
            SinkError::Write { source, .. } => format!("write: {source}"),
            SinkError::Rejected { reason, .. } => format!("rejected: {reason}"),
        }
    }

    /// Name of the sink that raised the error.
    pub fn sink(&self) -> &'static str {
        match self {
            SinkError::Setup { sink, .. }
            | SinkError::Write { sink, .. }
            | SinkError::Rejected { sink, .. } => sink,
        }
    }
}

/// One sink whose `setup()` failed during a registration call.
///
/// The sink itself stays registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupFailure {
    /// Name reported by [`Sink::name`](crate::Sink::name).
    pub sink: &'static str,
    /// Zero-based position of the sink in the registration call.
    pub position: usize,
    /// Error message or panic payload.
    pub reason: String,
}

/// # Setup failures collected over one registration call.
///
/// Every sink passed to the call is appended and set up before this error is
/// produced, so failing sinks are still counted by the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", summarize(.failures))]
pub struct RegistrationError {
    failures: Vec<SetupFailure>,
}

impl RegistrationError {
    pub(crate) fn new(failures: Vec<SetupFailure>) -> Self {
        Self { failures }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        "registration_setup_failed"
    }

    /// The individual failures, in registration order.
    pub fn failures(&self) -> &[SetupFailure] {
        &self.failures
    }

    /// Consumes the error and returns the individual failures.
    pub fn into_failures(self) -> Vec<SetupFailure> {
        self.failures
    }
}

fn summarize(failures: &[SetupFailure]) -> String {
    let mut out = format!("{} sink(s) failed to set up: ", failures.len());
    for (i, f) in failures.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "#{} '{}': {}", f.position, f.sink, f.reason);
    }
    out
}

/// Unknown severity name passed to `Severity::from_str`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown severity '{input}'")]
pub struct ParseSeverityError {
    /// The rejected input.
    pub input: String,
}
