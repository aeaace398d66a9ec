//! # ConsoleSink: human-readable stdout/stderr output
//!
//! Enabled via the `console` feature (on by default).
//!
//! ## Output format
//! ```text
//! [🐞 AppLogger] cache warmed in 12ms
//! [❌ Sync] upload failed
//! sync failed
//!   caused by: socket closed
//! ```
//!
//! With `symbols = false` the pictogram is replaced by the severity label
//! (`[debug AppLogger] ...`).
//!
//! Output longer than [`ConsoleConfig::max_chunk_len`] bytes is split into
//! several writes, so line-limited consumers (logcat-style buffers, terminals
//! with small pipes) never truncate a message.

use std::io::{self, Write};

use parking_lot::Mutex;

use crate::core::report_failure;
use crate::error::SinkError;
use crate::severity::Severity;

use super::{ErrorRef, Sink, error_chain, split_chunks};

/// Standard stream targeted by a [`ConsoleSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stream {
    /// Process stdout.
    Stdout,
    /// Process stderr (default).
    #[default]
    Stderr,
}

/// Console sink settings.
///
/// ## Field semantics
/// - `min_severity`: events below this level are not loggable
/// - `max_chunk_len`: split rendered output into pieces of at most this many
///   bytes (`0` = never split)
/// - `symbols`: prefix with a pictogram instead of the severity label
/// - `stream`: stdout or stderr
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub min_severity: Severity,
    pub max_chunk_len: usize,
    pub symbols: bool,
    pub stream: Stream,
}

impl Default for ConsoleConfig {
    /// Default configuration:
    ///
    /// - `min_severity = Verbose`
    /// - `max_chunk_len = 4000`
    /// - `symbols = true`
    /// - `stream = Stderr`
    fn default() -> Self {
        Self {
            min_severity: Severity::Verbose,
            max_chunk_len: 4000,
            symbols: true,
            stream: Stream::Stderr,
        }
    }
}

/// Sink that renders events as text lines.
pub struct ConsoleSink {
    config: ConsoleConfig,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    /// Console sink with default settings (stderr).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ConsoleConfig::default())
    }

    /// Console sink writing to the stream named in `config`.
    #[must_use]
    pub fn with_config(config: ConsoleConfig) -> Self {
        let out: Box<dyn Write + Send> = match config.stream {
            Stream::Stdout => Box::new(io::stdout()),
            Stream::Stderr => Box::new(io::stderr()),
        };
        Self {
            config,
            out: Mutex::new(out),
        }
    }

    /// Console sink writing to an arbitrary writer; `config.stream` is ignored.
    #[must_use]
    pub fn with_writer(config: ConsoleConfig, writer: impl Write + Send + 'static) -> Self {
        Self {
            config,
            out: Mutex::new(Box::new(writer)),
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Renders one event without writing it.
    pub fn render(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        error: Option<&ErrorRef>,
    ) -> String {
        let marker = if self.config.symbols {
            severity.symbol()
        } else {
            severity.as_label()
        };

        let mut text = format!("[{marker} {tag}] {message}");
        if let Some(err) = error {
            text.push('\n');
            text.push_str(&error_chain(&**err));
        }
        text
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn tear_down(&self) {
        if let Err(err) = self.out.lock().flush() {
            report_failure(self.name(), "tear_down", &err.to_string());
        }
    }

    fn is_loggable(&self, _tag: Option<&str>, severity: Severity) -> bool {
        severity >= self.config.min_severity
    }

    fn log(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        error: Option<&ErrorRef>,
    ) -> Result<(), SinkError> {
        let text = self.render(severity, tag, message, error);
        let write_err = |source| SinkError::Write {
            sink: "console",
            source,
        };

        let mut out = self.out.lock();
        for chunk in split_chunks(&text, self.config.max_chunk_len) {
            writeln!(out, "{chunk}").map_err(write_err)?;
        }
        out.flush().map_err(write_err)
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    /// Writer that appends into a shared buffer.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_render_with_symbols() {
        let sink = ConsoleSink::with_writer(ConsoleConfig::default(), io::sink());
        assert_eq!(
            sink.render(Severity::Debug, "AppLogger", "hello", None),
            "[🐞 AppLogger] hello"
        );
    }

    #[test]
    fn test_render_labels_and_error() {
        let cfg = ConsoleConfig {
            symbols: false,
            ..ConsoleConfig::default()
        };
        let sink = ConsoleSink::with_writer(cfg, io::sink());
        let err: ErrorRef = Arc::new(io::Error::other("disk full"));

        assert_eq!(
            sink.render(Severity::Error, "Store", "save failed", Some(&err)),
            "[error Store] save failed\ndisk full"
        );
    }

    #[test]
    fn test_log_writes_chunks() {
        let buf = SharedBuf::default();
        let cfg = ConsoleConfig {
            symbols: false,
            max_chunk_len: 10,
            ..ConsoleConfig::default()
        };
        let sink = ConsoleSink::with_writer(cfg, buf.clone());

        sink.log(Severity::Info, "T", "0123456789", None).unwrap();
        // "[info T] 0123456789" is 19 bytes → two chunks
        assert_eq!(buf.text(), "[info T] 0\n123456789\n");
    }

    #[test]
    fn test_min_severity() {
        let cfg = ConsoleConfig {
            min_severity: Severity::Info,
            ..ConsoleConfig::default()
        };
        let sink = ConsoleSink::with_writer(cfg, io::sink());
        assert!(!sink.is_loggable(None, Severity::Debug));
        assert!(sink.is_loggable(None, Severity::Info));
        assert_eq!(sink.config().min_severity, Severity::Info);
    }

    struct StuckFlush;

    impl Write for StuckFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("device gone"))
        }
    }

    #[test]
    fn test_tear_down_reports_flush_failure() {
        let sink = ConsoleSink::with_writer(ConsoleConfig::default(), StuckFlush);

        let out = crate::core::capture_diagnostics(|| sink.tear_down());

        assert!(out.contains("sink failure isolated"));
        assert!(out.contains("sink=\"console\""));
        assert!(out.contains("stage=\"tear_down\""));
        assert!(out.contains("reason=\"device gone\""));
    }

    #[test]
    fn test_write_failure_surfaces_as_sink_error() {
        let sink = ConsoleSink::with_writer(ConsoleConfig::default(), BrokenPipe);
        let err = sink.log(Severity::Info, "T", "m", None).unwrap_err();
        assert_eq!(err.as_label(), "sink_write");
        assert_eq!(err.sink(), "console");
    }
}
