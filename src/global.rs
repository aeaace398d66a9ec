//! # Process-wide default facade.
//!
//! Most code should hold an explicit [`Cedar`] (or `Arc<Cedar>`) and pass it
//! where it is needed. For parity with global logging APIs, a lazily created
//! default instance is also available through the free functions below.
//!
//! ## Lifecycle
//! ```text
//! init(config)  ──► first call wins, later calls return Err(config)
//! global()      ──► initializes with Config::default() if init() was never called
//! plant/uproot/clear_all/count/forest/log_at/v/d/i/w/e ──► global()
//! ```

use std::sync::OnceLock;

use crate::config::Config;
use crate::core::{Cedar, DispatchReport};
use crate::error::RegistrationError;
use crate::severity::Severity;
use crate::sinks::{ErrorRef, Sink, SinkRef};

static GLOBAL: OnceLock<Cedar> = OnceLock::new();

/// Initializes the process-wide facade with `config`.
///
/// Returns the config back if the facade already exists.
pub fn init(config: Config) -> Result<&'static Cedar, Config> {
    let mut pending = Some(config);
    let cedar = GLOBAL.get_or_init(|| Cedar::new(pending.take().unwrap_or_default()));
    match pending {
        None => Ok(cedar),
        Some(config) => Err(config),
    }
}

/// The process-wide facade.
pub fn global() -> &'static Cedar {
    GLOBAL.get_or_init(Cedar::default)
}

pub fn plant(sink: SinkRef) -> Result<(), RegistrationError> {
    global().plant(sink)
}

pub fn plant_all<I>(sinks: I) -> Result<(), RegistrationError>
where
    I: IntoIterator<Item = SinkRef>,
{
    global().plant_all(sinks)
}

pub fn uproot<S>(sink: &std::sync::Arc<S>) -> bool
where
    S: Sink + ?Sized,
{
    global().uproot(sink)
}

pub fn clear_all() {
    global().clear_all();
}

pub fn count() -> usize {
    global().count()
}

pub fn forest() -> Vec<SinkRef> {
    global().forest()
}

pub fn log_at(
    severity: Severity,
    message: &str,
    tag: Option<&str>,
    error: Option<&ErrorRef>,
) -> DispatchReport {
    global().log_at(severity, message, tag, error)
}

pub fn v(message: &str) {
    global().v(message);
}

pub fn d(message: &str) {
    global().d(message);
}

pub fn i(message: &str) {
    global().i(message);
}

pub fn w(message: &str) {
    global().w(message);
}

pub fn e(message: &str) {
    global().e(message);
}
