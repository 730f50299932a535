//! Integration tests for properties paired with change signals.

use std::sync::Arc;

use intake_core::{Property, Signal};
use parking_lot::Mutex;

struct MirroredValue {
    value: Property<String>,
    value_changed: Signal<String>,
}

impl MirroredValue {
    fn new() -> Self {
        Self {
            value: Property::default(),
            value_changed: Signal::new(),
        }
    }

    fn publish(&self, value: &str) {
        if self.value.set(value.to_string()) {
            self.value_changed.emit(value.to_string());
        }
    }
}

#[test]
fn test_signal_only_fires_on_actual_change() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mirror = MirroredValue::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    mirror.value_changed.connect(move |v| seen_clone.lock().push(v.clone()));

    mirror.publish("0");
    mirror.publish("0");
    mirror.publish("01");
    mirror.publish("");

    assert_eq!(*seen.lock(), vec!["0", "01", ""]);
}

#[test]
fn test_blocked_signal_still_tracks_value() {
    let mirror = MirroredValue::new();
    let count = Arc::new(Mutex::new(0));
    let count_clone = count.clone();
    mirror.value_changed.connect(move |_| *count_clone.lock() += 1);

    mirror.value_changed.set_blocked(true);
    mirror.publish("12345");
    mirror.value_changed.set_blocked(false);

    assert_eq!(mirror.value.get(), "12345");
    assert_eq!(*count.lock(), 0);

    mirror.publish("12345");
    assert_eq!(*count.lock(), 0);
}

#[test]
fn test_scoped_connection_ends_with_guard() {
    let mirror = MirroredValue::new();
    let count = Arc::new(Mutex::new(0));

    {
        let count_clone = count.clone();
        let guard = mirror
            .value_changed
            .connect_scoped(move |_| *count_clone.lock() += 1);
        mirror.publish("a");
        assert_eq!(mirror.value_changed.connection_count(), 1);
        let _ = guard.id();
    }

    mirror.publish("b");
    assert_eq!(*count.lock(), 1);
    assert_eq!(mirror.value_changed.connection_count(), 0);
}
