//! Runtime core: registry, dispatch and the facade.
//!
//! Internal modules:
//! - [`registry`]: ordered multiset of active sinks and their lifecycle hooks;
//! - [`dispatch`]: synchronous fan-out with per-sink failure isolation;
//! - [`cedar`]: the facade wrapping both.

mod cedar;
mod dispatch;
mod registry;

pub use cedar::{Cedar, LogCall};
pub use dispatch::{DispatchReport, Dispatcher};
pub use registry::SinkRegistry;

use std::any::Any;

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Reports a failure that was isolated at the registry/dispatch boundary.
pub(crate) fn report_failure(sink: &str, stage: &str, reason: &str) {
    tracing::warn!(
        target: "cedar_logging",
        sink,
        stage,
        reason,
        "sink failure isolated"
    );
}

/// Runs `f` under a scoped `tracing` subscriber and returns everything it printed.
#[cfg(test)]
pub(crate) fn capture_diagnostics(f: impl FnOnce()) -> String {
    use std::io;
    use std::sync::Arc;

    use parking_lot::Mutex;

    #[derive(Clone, Default)]
    struct Buf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buf = Buf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buf.0.lock().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_failure_is_structured() {
        let out = capture_diagnostics(|| report_failure("console", "log", "pipe closed"));
        assert!(out.contains("sink failure isolated"));
        assert!(out.contains("stage=\"log\""));
        assert!(out.contains("reason=\"pipe closed\""));
    }

    #[test]
    fn test_panic_message_variants() {
        let s: Box<dyn Any + Send> = Box::new("static");
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let other: Box<dyn Any + Send> = Box::new(42_u32);

        assert_eq!(panic_message(&*s), "static");
        assert_eq!(panic_message(&*owned), "owned");
        assert_eq!(panic_message(&*other), "unknown panic");
    }
}
