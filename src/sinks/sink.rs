//! # Core sink trait
//!
//! `Sink` is the extension point for plugging log consumers into the
//! registry. Every event dispatched through the facade is offered to every
//! registered sink, in registration order, on the caller's thread.
//!
//! ## Contract
//! - `setup()` runs exactly once per registration, before the registration call
//!   returns and before any dispatch can observe the sink.
//! - `tear_down()` runs exactly once per removal (single or bulk) and must drop
//!   any buffered state.
//! - `is_loggable()` is a pure predicate; it may be called concurrently.
//! - `log()` is only called after `is_loggable()` returned `true` for the same
//!   event. Two dispatches may call `log()` concurrently, so sinks with mutable
//!   state guard it themselves.
//! - `setup()` and `tear_down()` run without the registry lock held; they may
//!   log through the facade. A sink never receives events logged from its own
//!   `setup()`.
//!
//! Panics in any of these methods are caught at the registry/dispatch boundary
//! and never reach the logging caller.

use std::sync::Arc;

use crate::error::SinkError;
use crate::severity::Severity;

/// Shared handle to an error attached to a log event.
///
/// The dispatcher passes the same reference to every sink; ownership stays
/// with the caller.
pub type ErrorRef = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Shared handle to a registered sink.
///
/// Sinks are compared by identity (pointer), never by value.
pub type SinkRef = Arc<dyn Sink>;

/// Contract for log consumers.
pub trait Sink: Send + Sync + 'static {
    /// Called once when the sink becomes active.
    ///
    /// An error leaves the sink registered; it is reported back to the caller
    /// of the registration as part of a
    /// [`RegistrationError`](crate::RegistrationError).
    fn setup(&self) -> Result<(), SinkError> {
        Ok(())
    }

    /// Called once when the sink stops being active. Must release buffers.
    fn tear_down(&self) {}

    /// Whether this sink wants an event with the given tag and severity.
    fn is_loggable(&self, tag: Option<&str>, severity: Severity) -> bool {
        let _ = (tag, severity);
        true
    }

    /// Emit or store one event.
    ///
    /// # Parameters
    /// - `severity`: event level
    /// - `tag`: resolved tag (never empty)
    /// - `message`: event text
    /// - `error`: optional error shared with every other sink
    fn log(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        error: Option<&ErrorRef>,
    ) -> Result<(), SinkError>;

    /// Human-readable name (for diagnostics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Identity comparison: true if both handles point at the same sink instance.
pub(crate) fn same_sink<A, B>(a: &Arc<A>, b: &Arc<B>) -> bool
where
    A: Sink + ?Sized,
    B: Sink + ?Sized,
{
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
