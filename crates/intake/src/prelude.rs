//! Prelude module for Intake.
//!
//! ```ignore
//! use intake::prelude::*;
//! ```
//!
//! This provides access to:
//! - The widget and its builder (`Intake`, `IntakeBuilder`)
//! - Options records (`DateOptions`, `PhoneOptions`, `PostalCodeOptions`)
//! - The host interface (`Document`, `MemoryDocument`, `ElementId`)
//! - Event types (`WidgetEvent`, `KeyPressEvent`, `Key`, ...)
//! - Signal/slot and property types

// ============================================================================
// Widget
// ============================================================================

pub use crate::widget::{CharClass, FieldGroup, GroupShape, Intake, IntakeBuilder, PartSpec};

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::config::{
    DateOptions, IntakeMetrics, IntakeOptions, PhoneOptions, PostalCodeOptions,
};
pub use crate::error::{IntakeError, Result};

// ============================================================================
// Host
// ============================================================================

pub use crate::host::{Document, ElementId, ElementRef, MemoryDocument, SelectionRange};

// ============================================================================
// Events
// ============================================================================

pub use crate::widget::{
    ClickEvent, FocusInEvent, FocusOutEvent, FocusReason, Key, KeyPressEvent, KeyReleaseEvent,
    KeyboardModifiers, PasteEvent, SubmitEvent, WidgetEvent,
};

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use intake_core::{Property, Signal};
