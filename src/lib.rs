//! # cedar-logging
//!
//! **Cedar** is a small log-distribution facade: application code emits
//! leveled, tagged events through one entry point, and every registered
//! [`Sink`] independently decides whether to consume and how to render them
//! (console, `tracing`, in-memory buffer, test capture, or your own).
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  app code    │   │  app code    │   │  app code    │
//!     │ cedar.d(..)  │   │ cedar.tag(..)│   │ cedar.e(..)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Cedar (facade)                                                   │
//! │  - Config (default tag, failure reporting)                        │
//! │  - Dispatcher (snapshot + synchronous fan-out)                    │
//! │  - SinkRegistry (ordered multiset, lifecycle hooks, one lock)     │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       snapshot() (lock held only here)
//!                                   │
//!                 ┌─────────────────┼─────────────────┐
//!                 ▼                 ▼                 ▼
//!          is_loggable()?    is_loggable()?    is_loggable()?
//!                 ▼                 ▼                 ▼
//!             S1.log()          S2.log()          S3.log()
//!        (panics/errors isolated per sink, caller never sees them)
//! ```
//!
//! ### Lifecycle
//! ```text
//! plant(sink)   ──► sink.setup() ──► registry.push(sink)       (push under lock)
//! uproot(sink)  ──► registry.remove(first match) ──► sink.tear_down()
//! clear_all()   ──► registry.take() ──► tear_down() on each
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                          |
//! |-------------------|---------------------------------------------------------------|---------------------------------------------|
//! | **Sink API**      | Plug in log consumers with their own filtering.               | [`Sink`], [`SinkRef`]                       |
//! | **Registry**      | Concurrency-safe ordered multiset with setup/tear-down hooks. | [`SinkRegistry`]                            |
//! | **Dispatch**      | Synchronous fan-out with per-sink failure isolation.          | [`Dispatcher`], [`DispatchReport`]          |
//! | **Facade**        | `plant` / `uproot` / per-severity calls, tags and errors.     | [`Cedar`], [`LogCall`], [`global()`]        |
//! | **Sinks**         | Ready-made consumers.                                         | [`ConsoleSink`], [`TracingSink`], [`MemorySink`], [`CaptureSink`] |
//! | **Errors**        | Typed errors for setup and sink failures.                     | [`SinkError`], [`RegistrationError`]        |
//!
//! ## Optional features
//! - `console` (default): exports [`ConsoleSink`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use cedar_logging::{Cedar, Config, MemorySink, Severity, SinkRef, TracingSink};
//!
//! let cedar = Cedar::new(Config::default().with_default_tag("Demo"));
//! let memory = Arc::new(MemorySink::with_capacity(50));
//!
//! cedar.plant_all([
//!     Arc::new(TracingSink::new()) as SinkRef,
//!     memory.clone() as SinkRef,
//! ]).unwrap();
//!
//! cedar.i("ready");
//! cedar.tag("Net").w("slow response");
//!
//! assert_eq!(memory.latest().unwrap().severity, Severity::Warning);
//! cedar.clear_all();
//! assert!(memory.is_empty());
//! ```
mod config;
mod core;
mod error;
mod global;
mod severity;
mod sinks;

// ---- Public re-exports ----

pub use config::{Config, DEFAULT_TAG};
pub use crate::core::{Cedar, DispatchReport, Dispatcher, LogCall, SinkRegistry};
pub use error::{ParseSeverityError, RegistrationError, SetupFailure, SinkError};
pub use global::{
    clear_all, count, d, e, forest, global, i, init, log_at, plant, plant_all, uproot, v, w,
};
pub use severity::Severity;
pub use sinks::{
    CaptureSink, CapturedEntry, DEFAULT_MEMORY_CAPACITY, ErrorRef, MemoryEntry, MemorySink, Sink,
    SinkRef, TracingSink,
};

// Optional: built-in console sink.
// Enabled by default; disable with `default-features = false`.
#[cfg(feature = "console")]
pub use sinks::{ConsoleConfig, ConsoleSink, Stream};
