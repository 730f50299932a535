//! Character-class policy and segment validation.
//!
//! A segment either admits digits only ([`CharClass::Numeric`]) or any
//! printable character ([`CharClass::FreeText`]). The policy decides the
//! two places where the key state machine diverges between the classes and
//! how text entering a segment outside of typing is cleaned up.
//!
//! # Validation States
//!
//! - [`ValidationState::Invalid`]: the text contains a rejected character or
//!   is longer than the segment allows
//! - [`ValidationState::Intermediate`]: the text is empty or partially typed
//! - [`ValidationState::Acceptable`]: the segment is complete

use std::fmt;

use crate::host::{Document, ElementId};

use super::keyboard::KeyClass;

/// Which characters a segment admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharClass {
    /// ASCII digits only.
    Numeric,
    /// Any non-control character.
    #[default]
    FreeText,
}

impl CharClass {
    /// Whether `c` may appear in a segment of this class.
    pub fn accepts(&self, c: char) -> bool {
        match self {
            CharClass::Numeric => c.is_ascii_digit(),
            CharClass::FreeText => !c.is_control(),
        }
    }

    /// Drop rejected characters and trim to `max_length` characters.
    pub fn sanitize(&self, text: &str, max_length: usize) -> String {
        text.chars()
            .filter(|c| self.accepts(*c))
            .take(max_length)
            .collect()
    }

    /// Whether a key class outside the explicitly handled set is suppressed
    /// on key-down regardless of the segment's fill state.
    ///
    /// Numeric segments whitelist digits; free-text segments allow anything
    /// that still fits.
    pub(crate) fn rejects_unlisted(&self) -> bool {
        matches!(self, CharClass::Numeric)
    }

    /// Whether a key-up of this class may have added a character, and so
    /// may complete the segment.
    pub(crate) fn completes_on(&self, class: KeyClass) -> bool {
        match self {
            CharClass::Numeric => {
                matches!(class, KeyClass::DigitKey | KeyClass::CompositionInput)
            }
            CharClass::FreeText => !matches!(
                class,
                KeyClass::ShiftTab
                    | KeyClass::LeftArrow
                    | KeyClass::Tab
                    | KeyClass::RightArrow
                    | KeyClass::Backspace
            ),
        }
    }

    /// Set the host attributes a text-entry element of this class carries.
    pub fn apply_input_attributes<D: Document + ?Sized>(&self, doc: &mut D, element: ElementId) {
        match self {
            CharClass::Numeric => {
                doc.set_attribute(element, "type", "number");
                doc.set_attribute(element, "inputmode", "numeric");
                doc.set_attribute(element, "pattern", "[0-9]*");
                doc.set_attribute(element, "min", "0");
            }
            CharClass::FreeText => doc.set_attribute(element, "type", "text"),
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClass::Numeric => write!(f, "numeric"),
            CharClass::FreeText => write!(f, "free-text"),
        }
    }
}

/// The result of validating segment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationState {
    /// The text cannot belong to the segment.
    Invalid,
    /// The text is incomplete but could become valid with more input.
    #[default]
    Intermediate,
    /// The text completes the segment.
    Acceptable,
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationState::Invalid => write!(f, "Invalid"),
            ValidationState::Intermediate => write!(f, "Intermediate"),
            ValidationState::Acceptable => write!(f, "Acceptable"),
        }
    }
}

/// Trait for input validators.
pub trait Validator: Send + Sync {
    /// Validate the input string.
    fn validate(&self, input: &str) -> ValidationState;

    /// Attempt to fix invalid input.
    ///
    /// The default implementation returns `None`, meaning no fixup is attempted.
    fn fixup(&self, _input: &str) -> Option<String> {
        None
    }
}

/// Validates the content of one segment against its class and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentValidator {
    class: CharClass,
    max_length: usize,
}

impl SegmentValidator {
    /// Create a validator for a segment.
    pub fn new(class: CharClass, max_length: usize) -> Self {
        Self { class, max_length }
    }

    /// The character class enforced.
    pub fn char_class(&self) -> CharClass {
        self.class
    }

    /// The maximum length enforced.
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl Validator for SegmentValidator {
    fn validate(&self, input: &str) -> ValidationState {
        let mut len = 0;
        for c in input.chars() {
            if !self.class.accepts(c) {
                return ValidationState::Invalid;
            }
            len += 1;
        }
        if len > self.max_length {
            ValidationState::Invalid
        } else if len == self.max_length {
            ValidationState::Acceptable
        } else {
            ValidationState::Intermediate
        }
    }

    fn fixup(&self, input: &str) -> Option<String> {
        Some(self.class.sanitize(input, self.max_length))
    }
}
