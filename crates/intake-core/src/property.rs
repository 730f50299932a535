//! Property system for Intake.
//!
//! Properties are the data backbone of the signal/slot system: when a
//! property changes, its owner emits a signal to notify interested parties.
//!
//! # Example
//!
//! ```
//! use intake_core::{Property, Signal};
//!
//! struct Mirror {
//!     value: Property<String>,
//!     value_changed: Signal<String>,
//! }
//!
//! impl Mirror {
//!     fn publish(&self, value: String) {
//!         if self.value.set(value.clone()) {
//!             self.value_changed.emit(value);
//!         }
//!     }
//! }
//!
//! let mirror = Mirror { value: Property::default(), value_changed: Signal::new() };
//! mirror.publish("555".into());
//! assert_eq!(mirror.value.get(), "555");
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// `Property<T>` wraps a value and provides change detection. When `set()` is
/// called, it compares the new value with the current one and returns whether
/// the value actually changed.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller should emit the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
