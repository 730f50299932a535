//! Core systems for Intake.
//!
//! This crate provides the foundational components shared by the Intake
//! widgets:
//!
//! - **Signal/Slot System**: Type-safe notification of state changes
//! - **Property System**: Values with change detection
//! - **Logging**: `tracing` targets and span names for filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use intake_core::Signal;
//!
//! let value_changed = Signal::<String>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit("5551234567".to_string());
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
