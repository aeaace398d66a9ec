//! The process-wide facade. Kept to a single test: the instance is shared
//! by every test in this binary.

use std::sync::Arc;

use cedar_logging::{CaptureSink, Config, ErrorRef, Severity, SinkRef};

#[test]
fn global_facade_round_trip() {
    let cedar = cedar_logging::init(Config::default().with_default_tag("Global")).unwrap();
    assert!(std::ptr::eq(cedar, cedar_logging::global()));

    let rejected = cedar_logging::init(Config::default()).unwrap_err();
    assert_eq!(rejected.default_tag, "AppLogger");
    assert_eq!(cedar_logging::global().config().default_tag, "Global");

    let a = Arc::new(CaptureSink::new());
    let b = Arc::new(CaptureSink::new());
    cedar_logging::plant(a.clone()).unwrap();
    cedar_logging::plant_all([b.clone() as SinkRef]).unwrap();
    assert_eq!(cedar_logging::count(), 2);
    assert_eq!(cedar_logging::forest().len(), 2);

    cedar_logging::v("v");
    cedar_logging::d("d");
    cedar_logging::i("i");
    cedar_logging::w("w");
    cedar_logging::e("e");
    let err: ErrorRef = Arc::new(std::io::Error::other("disk full"));
    let report = cedar_logging::log_at(Severity::Error, "write failed", Some("Io"), Some(&err));
    assert_eq!(report.delivered, 2);

    assert_eq!(a.entries().len(), 6);
    assert_eq!(a.entries_with_tag("Global").len(), 5);
    assert_eq!(b.entries_with_error().len(), 1);

    assert!(cedar_logging::uproot(&a));
    assert!(!a.is_setup());
    assert_eq!(cedar_logging::count(), 1);

    cedar_logging::clear_all();
    assert_eq!(cedar_logging::count(), 0);
    assert!(!b.is_setup());
}
