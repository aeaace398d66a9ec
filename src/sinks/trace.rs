//! # TracingSink: bridge into the `tracing` ecosystem
//!
//! Forwards every event to the process-wide `tracing` dispatcher, so
//! applications that already configured `tracing-subscriber` (JSON output,
//! env filters, files) receive cedar events alongside their own spans.
//!
//! ## Level mapping
//! ```text
//! Verbose → TRACE
//! Debug   → DEBUG
//! Info    → INFO
//! Warning → WARN
//! Error   → ERROR
//! ```
//!
//! `is_loggable` defers to `tracing::enabled!` for the mapped level, so events
//! that the installed subscriber would discard are never rendered.
//! Every event is emitted under target `cedar` with `tag` and `error` fields.

use tracing::Level;

use crate::error::SinkError;
use crate::severity::Severity;

use super::{ErrorRef, Sink, error_chain};

/// Sink forwarding events to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    min_severity: Severity,
}

impl TracingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Additionally drop events below `min`, whatever the subscriber says.
    #[must_use]
    pub fn with_min_severity(mut self, min: Severity) -> Self {
        self.min_severity = min;
        self
    }

    /// `tracing` level used for `severity`.
    pub fn level_for(severity: Severity) -> Level {
        match severity {
            Severity::Verbose => Level::TRACE,
            Severity::Debug => Level::DEBUG,
            Severity::Info => Level::INFO,
            Severity::Warning => Level::WARN,
            Severity::Error => Level::ERROR,
        }
    }
}

// `tracing` macros need the level as a constant.
macro_rules! emit {
    ($level:expr, $tag:expr, $error:expr, $message:expr) => {
        tracing::event!(target: "cedar", $level, tag = $tag, error = $error, "{}", $message)
    };
}

impl Sink for TracingSink {
    fn is_loggable(&self, _tag: Option<&str>, severity: Severity) -> bool {
        if severity < self.min_severity {
            return false;
        }
        match severity {
            Severity::Verbose => tracing::enabled!(target: "cedar", Level::TRACE),
            Severity::Debug => tracing::enabled!(target: "cedar", Level::DEBUG),
            Severity::Info => tracing::enabled!(target: "cedar", Level::INFO),
            Severity::Warning => tracing::enabled!(target: "cedar", Level::WARN),
            Severity::Error => tracing::enabled!(target: "cedar", Level::ERROR),
        }
    }

    fn log(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        error: Option<&ErrorRef>,
    ) -> Result<(), SinkError> {
        let error_text = error.map(|e| error_chain(&**e));
        let error = error_text.as_deref();

        match severity {
            Severity::Verbose => emit!(Level::TRACE, tag, error, message),
            Severity::Debug => emit!(Level::DEBUG, tag, error, message),
            Severity::Info => emit!(Level::INFO, tag, error, message),
            Severity::Warning => emit!(Level::WARN, tag, error, message),
            Severity::Error => emit!(Level::ERROR, tag, error, message),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "tracing"
    }
}
