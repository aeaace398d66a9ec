//! # Cedar: the logging facade.
//!
//! [`Cedar`] wraps a [`SinkRegistry`] and a [`Dispatcher`] behind the calls
//! applications actually use: `plant` / `uproot` / `clear_all` to manage
//! sinks, and one method per severity to log.
//!
//! ## High-level architecture
//! ```text
//! app ──► Cedar::d("msg") ──► Config::resolve_tag(None) = "AppLogger"
//!                        └──► Dispatcher::dispatch(Debug, "AppLogger", "msg", None)
//!                                 └──► SinkRegistry::snapshot() ──► sinks...
//!
//! app ──► Cedar::tag("Net").with_error(&err).e("upload failed")
//!                        └──► Dispatcher::dispatch(Error, "Net", "upload failed", Some(&err))
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use cedar_logging::{Cedar, CaptureSink, Config, ErrorRef, Severity};
//!
//! let cedar = Cedar::new(Config::default());
//! let sink = Arc::new(CaptureSink::new());
//! cedar.plant(sink.clone()).unwrap();
//!
//! cedar.i("service started");
//! let err: ErrorRef = Arc::new(std::io::Error::other("refused"));
//! cedar.tag("Net").with_error(&err).e("connect failed");
//!
//! let entries = sink.entries();
//! assert_eq!(entries[0].tag, "AppLogger");
//! assert_eq!(entries[1].tag, "Net");
//! assert_eq!(entries[1].severity, Severity::Error);
//!
//! cedar.uproot(&sink);
//! assert_eq!(cedar.count(), 0);
//! ```

use std::sync::Arc;

use crate::config::Config;
use crate::error::RegistrationError;
use crate::severity::Severity;
use crate::sinks::{ErrorRef, Sink, SinkRef};

use super::dispatch::{DispatchReport, Dispatcher};
use super::registry::SinkRegistry;

/// Logging facade over a sink registry.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
#[derive(Debug)]
pub struct Cedar {
    config: Config,
    dispatcher: Dispatcher,
}

impl Cedar {
    /// Creates a facade with its own empty registry.
    pub fn new(config: Config) -> Self {
        Self::with_registry(config, Arc::new(SinkRegistry::new()))
    }

    /// Creates a facade over an existing (possibly shared) registry.
    ///
    /// `config.report_failures` is applied to the registry as well, so it
    /// governs tear-down diagnostics for every facade sharing it.
    pub fn with_registry(config: Config, registry: Arc<SinkRegistry>) -> Self {
        registry.set_failure_reporting(config.report_failures);
        let dispatcher = Dispatcher::new(registry).with_failure_reporting(config.report_failures);
        Self { config, dispatcher }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The registry this facade dispatches from.
    pub fn registry(&self) -> &Arc<SinkRegistry> {
        self.dispatcher.registry()
    }

    // ---- Registry pass-through ----

    /// Registers one sink and runs its `setup()`.
    ///
    /// `setup()` runs before the sink is appended, so it may log through this
    /// facade; those events reach the sinks already planted, not the new one.
    pub fn plant(&self, sink: SinkRef) -> Result<(), RegistrationError> {
        self.registry().register(sink)
    }

    /// Registers several sinks in order. See [`SinkRegistry::register_all`].
    pub fn plant_all<I>(&self, sinks: I) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = SinkRef>,
    {
        self.registry().register_all(sinks)
    }

    /// Removes one registration of `sink`; no-op if it is not planted.
    pub fn uproot<S>(&self, sink: &Arc<S>) -> bool
    where
        S: Sink + ?Sized,
    {
        self.registry().remove(sink)
    }

    /// Removes and tears down every sink.
    pub fn clear_all(&self) {
        self.registry().clear();
    }

    /// Number of registrations.
    pub fn count(&self) -> usize {
        self.registry().count()
    }

    /// Snapshot of the registered sinks.
    pub fn forest(&self) -> Vec<SinkRef> {
        self.registry().snapshot()
    }

    // ---- Logging ----

    /// Logs `message` at `severity`.
    ///
    /// `tag = None` uses [`Config::default_tag`]. Never fails.
    pub fn log_at(
        &self,
        severity: Severity,
        message: &str,
        tag: Option<&str>,
        error: Option<&ErrorRef>,
    ) -> DispatchReport {
        let tag = self.config.resolve_tag(tag);
        self.dispatcher.dispatch(severity, tag, message, error)
    }

    /// Starts a call with an explicit tag.
    pub fn tag<'a>(&'a self, tag: &'a str) -> LogCall<'a> {
        LogCall::new(self).tag(tag)
    }

    /// Starts a call carrying `error`.
    pub fn with_error<'a>(&'a self, error: &'a ErrorRef) -> LogCall<'a> {
        LogCall::new(self).with_error(error)
    }

    pub fn v(&self, message: &str) {
        self.log_at(Severity::Verbose, message, None, None);
    }

    pub fn d(&self, message: &str) {
        self.log_at(Severity::Debug, message, None, None);
    }

    pub fn i(&self, message: &str) {
        self.log_at(Severity::Info, message, None, None);
    }

    pub fn w(&self, message: &str) {
        self.log_at(Severity::Warning, message, None, None);
    }

    pub fn e(&self, message: &str) {
        self.log_at(Severity::Error, message, None, None);
    }

    // Error-carrying forms, default tag.

    pub fn v_err(&self, message: &str, error: &ErrorRef) {
        self.log_at(Severity::Verbose, message, None, Some(error));
    }

    pub fn d_err(&self, message: &str, error: &ErrorRef) {
        self.log_at(Severity::Debug, message, None, Some(error));
    }

    pub fn i_err(&self, message: &str, error: &ErrorRef) {
        self.log_at(Severity::Info, message, None, Some(error));
    }

    pub fn w_err(&self, message: &str, error: &ErrorRef) {
        self.log_at(Severity::Warning, message, None, Some(error));
    }

    pub fn e_err(&self, message: &str, error: &ErrorRef) {
        self.log_at(Severity::Error, message, None, Some(error));
    }
}

impl Default for Cedar {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// One logging call with optional tag and error.
///
/// Built by [`Cedar::tag`] / [`Cedar::with_error`]; finished by one of the
/// severity methods.
#[derive(Clone, Copy)]
#[must_use = "a LogCall does nothing until a severity method is called"]
pub struct LogCall<'a> {
    cedar: &'a Cedar,
    tag: Option<&'a str>,
    error: Option<&'a ErrorRef>,
}

impl<'a> LogCall<'a> {
    fn new(cedar: &'a Cedar) -> Self {
        Self {
            cedar,
            tag: None,
            error: None,
        }
    }

    pub fn tag(mut self, tag: &'a str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn with_error(mut self, error: &'a ErrorRef) -> Self {
        self.error = Some(error);
        self
    }

    /// Logs at an explicit severity.
    pub fn log(self, severity: Severity, message: &str) -> DispatchReport {
        self.cedar.log_at(severity, message, self.tag, self.error)
    }

    pub fn v(self, message: &str) {
        self.log(Severity::Verbose, message);
    }

    pub fn d(self, message: &str) {
        self.log(Severity::Debug, message);
    }

    pub fn i(self, message: &str) {
        self.log(Severity::Info, message);
    }

    pub fn w(self, message: &str) {
        self.log(Severity::Warning, message);
    }

    pub fn e(self, message: &str) {
        self.log(Severity::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::CaptureSink;

    #[test]
    fn test_default_tag_and_severity_methods() {
        let cedar = Cedar::default();
        let sink = Arc::new(CaptureSink::new());
        cedar.plant(sink.clone()).unwrap();

        cedar.v("v");
        cedar.d("d");
        cedar.i("i");
        cedar.w("w");
        cedar.e("e");

        let entries = sink.entries();
        let severities: Vec<Severity> = entries.iter().map(|e| e.severity).collect();
        assert_eq!(severities, Severity::ALL.to_vec());
        assert!(entries.iter().all(|e| e.tag == "AppLogger" && e.error.is_none()));
    }

    #[test]
    fn test_log_call_builder() {
        let cedar = Cedar::new(Config::default().with_default_tag("Main"));
        let sink = Arc::new(CaptureSink::new());
        cedar.plant(sink.clone()).unwrap();
        let err: ErrorRef = Arc::new(std::io::Error::other("nope"));

        cedar.tag("Db").w("slow query");
        cedar.with_error(&err).e("failed");
        let report = cedar.tag("Db").with_error(&err).log(Severity::Info, "both");

        assert_eq!(report.delivered, 1);
        let entries = sink.entries();
        assert_eq!(entries[0].tag, "Db");
        assert!(entries[0].error.is_none());
        assert_eq!(entries[1].tag, "Main");
        assert!(Arc::ptr_eq(entries[1].error.as_ref().unwrap(), &err));
        assert_eq!(entries[2].tag, "Db");
        assert!(entries[2].error.is_some());
    }

    #[test]
    fn test_error_forms() {
        let cedar = Cedar::default();
        let sink = Arc::new(CaptureSink::new());
        cedar.plant(sink.clone()).unwrap();
        let err: ErrorRef = Arc::new(std::io::Error::other("eof"));

        cedar.v_err("v", &err);
        cedar.d_err("d", &err);
        cedar.i_err("i", &err);
        cedar.w_err("w", &err);
        cedar.e_err("e", &err);

        let entries = sink.entries_with_error();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[4].severity, Severity::Error);
        assert!(entries.iter().all(|e| e.tag == "AppLogger"));
    }

    #[test]
    fn test_shared_registry() {
        let registry = Arc::new(SinkRegistry::new());
        let a = Cedar::with_registry(Config::default(), registry.clone());
        let b = Cedar::with_registry(Config::default().with_default_tag("B"), registry.clone());
        let sink = Arc::new(CaptureSink::new());

        a.plant(sink.clone()).unwrap();
        assert_eq!(b.count(), 1);

        b.i("from b");
        assert_eq!(sink.entries()[0].tag, "B");

        b.clear_all();
        assert_eq!(a.count(), 0);
        assert!(!sink.is_setup());
    }

    struct PanicOnTearDown;

    impl Sink for PanicOnTearDown {
        fn tear_down(&self) {
            panic!("tear_down failed");
        }

        fn log(
            &self,
            _: Severity,
            _: &str,
            _: &str,
            _: Option<&ErrorRef>,
        ) -> Result<(), crate::error::SinkError> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "panic_on_tear_down"
        }
    }

    #[test]
    fn test_report_failures_off_silences_tear_down() {
        let quiet = Config {
            report_failures: false,
            ..Config::default()
        };
        let cedar = Cedar::with_registry(quiet, Arc::new(SinkRegistry::new()));
        cedar.plant(Arc::new(PanicOnTearDown)).unwrap();

        let out = crate::core::capture_diagnostics(|| cedar.clear_all());

        assert_eq!(cedar.count(), 0);
        assert!(!out.contains("sink failure isolated"), "unexpected output: {out}");
    }

    #[test]
    fn test_report_failures_on_reports_tear_down() {
        let cedar = Cedar::new(Config::default());
        cedar.plant(Arc::new(PanicOnTearDown)).unwrap();

        let out = crate::core::capture_diagnostics(|| cedar.clear_all());

        assert!(out.contains("sink failure isolated"));
        assert!(out.contains("sink=\"panic_on_tear_down\""));
        assert!(out.contains("reason=\"tear_down failed\""));
    }

    #[test]
    fn test_setup_may_log_through_the_facade() {
        use std::sync::mpsc;
        use std::time::Duration;

        struct Announcing {
            cedar: Arc<Cedar>,
            own: CaptureSink,
        }

        impl Sink for Announcing {
            fn setup(&self) -> Result<(), crate::error::SinkError> {
                self.cedar.tag("Boot").i("sink ready");
                Ok(())
            }

            fn log(
                &self,
                severity: Severity,
                tag: &str,
                message: &str,
                error: Option<&ErrorRef>,
            ) -> Result<(), crate::error::SinkError> {
                self.own.log(severity, tag, message, error)
            }
        }

        let cedar = Arc::new(Cedar::default());
        let earlier = Arc::new(CaptureSink::new());
        cedar.plant(earlier.clone()).unwrap();
        let announcing = Arc::new(Announcing {
            cedar: cedar.clone(),
            own: CaptureSink::new(),
        });

        let (tx, rx) = mpsc::channel();
        let (facade, sink) = (cedar.clone(), announcing.clone());
        std::thread::spawn(move || {
            let _ = tx.send(facade.plant(sink));
        });
        let planted = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("plant must return while setup logs");

        assert!(planted.is_ok());
        assert_eq!(earlier.entries_with_tag("Boot").len(), 1);
        assert!(announcing.own.entries().is_empty());
        assert_eq!(cedar.count(), 2);

        // break the facade <-> sink cycle
        cedar.clear_all();
    }
}
