//! Intake - segmented input widgets.
//!
//! An Intake widget splits one logical value (a date, a phone number, a
//! postal code) into several adjacent editable segments separated by static
//! dividers. It moves focus between the segments as the user types,
//! reassembles the value and mirrors it into a hidden field of the host form.
//!
//! The host document is abstracted behind [`host::Document`];
//! [`host::MemoryDocument`] is a complete in-memory host.
//!
//! # Example
//!
//! ```
//! use intake::prelude::*;
//!
//! let mut doc = MemoryDocument::new();
//! doc.create_with_id("div", "phone");
//! doc.create_with_id("input", "phone-value");
//!
//! let intake = Intake::builder("#phone")
//!     .hidden_sink("#phone-value")
//!     .existing_value("5551234567")
//!     .options(PhoneOptions::new("(XXX)XXX-XXXX"))
//!     .build(&mut doc)?;
//!
//! assert_eq!(intake.group().values(), vec!["555", "123", "4567"]);
//! assert_eq!(intake.assembled_value(), "(555)123-4567");
//! assert_eq!(intake.value(), "5551234567");
//! # Ok::<(), IntakeError>(())
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod prelude;
pub mod widget;

pub use error::{IntakeError, Result};
pub use intake_core::{ConnectionGuard, ConnectionId, Property, Signal, logging};
pub use widget::{Intake, IntakeBuilder};
