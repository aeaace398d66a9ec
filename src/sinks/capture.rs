//! # CaptureSink: recording test double
//!
//! Records every event it receives so tests can assert on delivery,
//! filtering and lifecycle hooks.
//!
//! ## Knobs
//! - [`CaptureSink::set_loggable`]: global on/off switch for `is_loggable`
//! - [`CaptureSink::set_min_severity`]: threshold filter (default `Verbose`)
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use cedar_logging::{Cedar, CaptureSink, Config, Severity};
//!
//! let cedar = Cedar::new(Config::default());
//! let capture = Arc::new(CaptureSink::new());
//! capture.set_min_severity(Severity::Info);
//! cedar.plant(capture.clone()).unwrap();
//!
//! cedar.d("dropped");
//! cedar.i("kept");
//!
//! assert_eq!(capture.entries().len(), 1);
//! assert_eq!(capture.entries()[0].message, "kept");
//! ```

use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::error::SinkError;
use crate::severity::Severity;

use super::{ErrorRef, Sink};

/// One event as seen by a [`CaptureSink`].
#[derive(Debug, Clone)]
pub struct CapturedEntry {
    /// Event level.
    pub severity: Severity,
    /// Resolved tag.
    pub tag: String,
    /// Event text.
    pub message: String,
    /// Attached error, if any (same `Arc` the caller passed).
    pub error: Option<ErrorRef>,
}

/// Recording sink with lifecycle tracking.
#[derive(Debug)]
pub struct CaptureSink {
    entries: Mutex<Vec<CapturedEntry>>,
    active: AtomicBool,
    loggable: AtomicBool,
    min_severity: AtomicU8,
    setups: AtomicUsize,
    tear_downs: AtomicUsize,
}

impl CaptureSink {
    /// Creates an inactive sink that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            active: AtomicBool::new(false),
            loggable: AtomicBool::new(true),
            min_severity: AtomicU8::new(Severity::Verbose as u8),
            setups: AtomicUsize::new(0),
            tear_downs: AtomicUsize::new(0),
        }
    }

    /// Turns the `is_loggable` switch on or off.
    pub fn set_loggable(&self, loggable: bool) {
        self.loggable.store(loggable, Ordering::SeqCst);
    }

    /// Sets the minimum severity accepted by `is_loggable`.
    pub fn set_min_severity(&self, severity: Severity) {
        self.min_severity.store(severity as u8, Ordering::SeqCst);
    }

    /// Current minimum severity.
    pub fn min_severity(&self) -> Severity {
        Severity::from_repr(self.min_severity.load(Ordering::SeqCst)).unwrap_or_default()
    }

    /// True between the latest `setup()` and the following `tear_down()`.
    pub fn is_setup(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// How many times `setup()` ran.
    pub fn setup_calls(&self) -> usize {
        self.setups.load(Ordering::SeqCst)
    }

    /// How many times `tear_down()` ran.
    pub fn tear_down_calls(&self) -> usize {
        self.tear_downs.load(Ordering::SeqCst)
    }

    /// Copy of everything recorded so far, oldest first.
    pub fn entries(&self) -> Vec<CapturedEntry> {
        self.entries.lock().clone()
    }

    /// Recorded entries with the given tag.
    pub fn entries_with_tag(&self, tag: &str) -> Vec<CapturedEntry> {
        self.filtered(|e| e.tag == tag)
    }

    /// Recorded entries with exactly the given severity.
    pub fn entries_with_severity(&self, severity: Severity) -> Vec<CapturedEntry> {
        self.filtered(|e| e.severity == severity)
    }

    /// Recorded entries that carry an error.
    pub fn entries_with_error(&self) -> Vec<CapturedEntry> {
        self.filtered(|e| e.error.is_some())
    }

    /// Drops all recorded entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn filtered(&self, keep: impl Fn(&CapturedEntry) -> bool) -> Vec<CapturedEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| keep(e))
            .cloned()
            .collect()
    }
}

impl Default for CaptureSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for CaptureSink {
    fn setup(&self) -> Result<(), SinkError> {
        self.setups.fetch_add(1, Ordering::SeqCst);
        self.active.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn tear_down(&self) {
        self.tear_downs.fetch_add(1, Ordering::SeqCst);
        self.active.store(false, Ordering::SeqCst);
        self.clear();
    }

    fn is_loggable(&self, _tag: Option<&str>, severity: Severity) -> bool {
        self.loggable.load(Ordering::SeqCst) && severity >= self.min_severity()
    }

    fn log(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        error: Option<&ErrorRef>,
    ) -> Result<(), SinkError> {
        self.entries.lock().push(CapturedEntry {
            severity,
            tag: tag.to_string(),
            message: message.to_string(),
            error: error.cloned(),
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "capture"
    }
}
