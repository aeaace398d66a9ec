//! # Example: console + tracing + memory sinks
//!
//! Plants three sinks on one facade and shows how each filters independently.
//!
//! ## Flow
//! ```text
//! Cedar ──► ConsoleSink  (Debug and up, stderr, emoji prefix)
//!       ├─► TracingSink  (whatever RUST_LOG enables)
//!       └─► MemorySink   (Warning and up, last 10)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=cedar=info cargo run --example console
//! ```

use std::sync::Arc;

use cedar_logging::{
    Cedar, Config, ConsoleConfig, ConsoleSink, ErrorRef, MemorySink, Severity, SinkRef, Stream,
    TracingSink,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cedar = Cedar::new(Config::default().with_default_tag("Demo"));

    let console = Arc::new(ConsoleSink::with_config(ConsoleConfig {
        min_severity: Severity::Debug,
        stream: Stream::Stderr,
        ..ConsoleConfig::default()
    }));
    let memory = Arc::new(MemorySink::with_capacity(10).with_min_severity(Severity::Warning));

    cedar.plant_all([
        console as SinkRef,
        Arc::new(TracingSink::new()) as SinkRef,
        memory.clone() as SinkRef,
    ])?;
    println!("planted {} sinks", cedar.count());

    cedar.v("verbose: console skips this");
    cedar.d("cache warmed");
    cedar.tag("Net").i("connected to upstream");
    cedar.tag("Net").w("slow response (1.2s)");

    let cause = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "socket closed");
    let err: ErrorRef = Arc::new(std::io::Error::other(format!("sync failed: {cause}")));
    cedar.tag("Sync").with_error(&err).e("upload failed");

    println!("memory buffer (newest first):");
    for entry in memory.entries() {
        println!("  {} {} {}", entry.severity, entry.tag, entry.message);
    }

    cedar.clear_all();
    println!("after clear_all: {} sinks, memory empty = {}", cedar.count(), memory.is_empty());
    Ok(())
}
