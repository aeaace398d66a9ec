//! # Log sinks.
//!
//! This module provides the [`Sink`] trait and the built-in implementations
//! that the registry fans events out to.
//!
//! ## Architecture
//! ```text
//! Cedar::d("msg") ──► Dispatcher ──► snapshot of SinkRegistry
//!                                        │
//!                                        ├──► sink1.is_loggable()? ──► sink1.log()
//!                                        ├──► sink2.is_loggable()? ──► sink2.log()
//!                                        └──► sinkN.is_loggable()? ──► sinkN.log()
//!                                                  │
//!                                  ┌───────────────┼──────────────┬──────────────┐
//!                                  ▼               ▼              ▼              ▼
//!                             ConsoleSink     TracingSink    MemorySink     CaptureSink
//! ```
//!
//! ## Built-in sinks
//! - [`ConsoleSink`]: renders `[<symbol> <tag>] <message>` to stdout/stderr (feature `console`)
//! - [`TracingSink`]: forwards events to the `tracing` ecosystem
//! - [`MemorySink`]: bounded, newest-first buffer for in-app log viewers
//! - [`CaptureSink`]: recording test double
//!
//! ## Implementing custom sinks
//! ```rust
//! use cedar_logging::{ErrorRef, Severity, Sink, SinkError};
//!
//! struct OnlyNetwork;
//!
//! impl Sink for OnlyNetwork {
//!     fn is_loggable(&self, tag: Option<&str>, _severity: Severity) -> bool {
//!         tag == Some("Net")
//!     }
//!
//!     fn log(
//!         &self,
//!         severity: Severity,
//!         tag: &str,
//!         message: &str,
//!         _error: Option<&ErrorRef>,
//!     ) -> Result<(), SinkError> {
//!         println!("{severity} {tag}: {message}");
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "only-network"
//!     }
//! }
//! ```

mod capture;
#[cfg(feature = "console")]
mod console;
mod memory;
mod sink;
mod trace;

pub use capture::{CaptureSink, CapturedEntry};
#[cfg(feature = "console")]
pub use console::{ConsoleConfig, ConsoleSink, Stream};
pub use memory::{DEFAULT_MEMORY_CAPACITY, MemoryEntry, MemorySink};
pub use sink::{ErrorRef, Sink, SinkRef};
pub use trace::TracingSink;

pub(crate) use sink::same_sink;

/// Renders an error followed by its `source()` chain, one cause per line.
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(c) = cause {
        out.push_str("\n  caused by: ");
        out.push_str(&c.to_string());
        cause = c.source();
    }
    out
}

/// Splits `text` into pieces of at most `max` bytes on char boundaries.
///
/// `max == 0` disables splitting. A single char wider than `max` still forms
/// its own chunk.
#[cfg_attr(not(feature = "console"), allow(dead_code))]
pub(crate) fn split_chunks(text: &str, max: usize) -> Vec<&str> {
    if max == 0 || text.len() <= max {
        return vec![text];
    }

    let mut chunks = Vec::with_capacity(text.len() / max + 1);
    let mut rest = text;
    while !rest.is_empty() {
        let mut cut = max.min(rest.len());
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        if cut == 0 {
            cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }
        let (head, tail) = rest.split_at(cut);
        chunks.push(head);
        rest = tail;
    }
    chunks
}
