//! Widget system for Intake.
//!
//! This module provides the segmented input widget and its building blocks:
//!
//! - [`events`]: event records delivered by the host
//! - [`keyboard`]: reduction of keys to the symbolic [`KeyClass`]
//! - [`policy`]: character classes and segment validation
//! - [`Segment`] and [`Divider`]: the parts of a field group
//! - [`state_machine`]: the per-keystroke decision functions
//! - [`group`]: field groups and the built-in value shapes
//! - [`Intake`]: the controller tying a group to the host document
//!
//! # Overview
//!
//! A keystroke lands on a segment. The widget classifies the key, asks the
//! state machine whether to suppress the host's default action and whether
//! focus moves, and after the key is released it trims the segment,
//! recomputes the group's value and mirrors it into the hidden sink.

pub mod events;
pub mod group;
pub mod keyboard;
pub mod policy;
pub mod state_machine;

mod divider;
mod intake;
mod segment;

pub use divider::Divider;
pub use events::{
    ClickEvent, EventBase, FocusInEvent, FocusOutEvent, FocusReason, Key, KeyPressEvent,
    KeyReleaseEvent, KeyboardModifiers, PasteEvent, SubmitEvent, WidgetEvent,
};
pub use group::{FieldGroup, GroupPlan, GroupShape, Part, PartSpec, PartStyle};
pub use intake::{
    CLEAR_BUTTON_CLASS, CONTAINER_CLASS, CONTAINER_SELECTED_CLASS, Intake, IntakeBuilder,
};
pub use keyboard::KeyClass;
pub use policy::{CharClass, SegmentValidator, ValidationState, Validator};
pub use segment::{Segment, SegmentSpec};
pub use state_machine::{Decision, FocusMove, SegmentContext};
