//! Event types delivered to an Intake widget by its host.
//!
//! The host translates its native input (key presses, focus changes, clicks,
//! paste and form submission) into these records and hands them to
//! [`Intake::handle_event`](crate::widget::Intake::handle_event). Every event
//! names the element it was dispatched on and carries an [`EventBase`]
//! through which the widget reports whether the host's default action must
//! be suppressed.

use crate::host::ElementId;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Check if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.control && !self.alt && !self.meta
    }
}

/// Keyboard keys.
///
/// Named keys follow the web `KeyboardEvent.code` vocabulary. Keys with no
/// dedicated variant arrive as [`Key::Character`] when the host knows the
/// produced character, or [`Key::Unknown`] with the raw key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Numpad
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab, Escape,

    // Whitespace
    Space,

    /// An input-method composition key whose character is not yet known.
    Process,
    /// A key identified only by the character it produces.
    Character(char),
    /// A key code with no known mapping.
    Unknown(u16),
}

impl Key {
    /// Check if this is a main-keyboard digit key (0-9).
    pub fn is_digit(&self) -> bool {
        self.digit_value().is_some() && !self.is_numpad()
    }

    /// Check if this is a numpad digit key.
    pub fn is_numpad(&self) -> bool {
        matches!(
            self,
            Key::Numpad0
                | Key::Numpad1
                | Key::Numpad2
                | Key::Numpad3
                | Key::Numpad4
                | Key::Numpad5
                | Key::Numpad6
                | Key::Numpad7
                | Key::Numpad8
                | Key::Numpad9
        )
    }

    /// The decimal value of a digit key, from either the main keyboard or
    /// the numpad.
    pub fn digit_value(&self) -> Option<u32> {
        let value = match self {
            Key::Digit0 | Key::Numpad0 => 0,
            Key::Digit1 | Key::Numpad1 => 1,
            Key::Digit2 | Key::Numpad2 => 2,
            Key::Digit3 | Key::Numpad3 => 3,
            Key::Digit4 | Key::Numpad4 => 4,
            Key::Digit5 | Key::Numpad5 => 5,
            Key::Digit6 | Key::Numpad6 => 6,
            Key::Digit7 | Key::Numpad7 => 7,
            Key::Digit8 | Key::Numpad8 => 8,
            Key::Digit9 | Key::Numpad9 => 9,
            _ => return None,
        };
        Some(value)
    }
}

/// Base data shared by every event.
#[derive(Debug, Clone, Default)]
pub struct EventBase {
    /// Whether the host's default action has been suppressed.
    default_suppressed: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self {
            default_suppressed: false,
        }
    }

    /// Check if the host's default action has been suppressed.
    pub fn is_default_suppressed(&self) -> bool {
        self.default_suppressed
    }

    /// Suppress the host's default action for this event.
    pub fn suppress_default(&mut self) {
        self.default_suppressed = true;
    }
}

/// Key press event, sent when a key is pressed.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The element the event was dispatched on.
    pub target: ElementId,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// The text input from this key press (if any).
    ///
    /// For printable keys, this contains the character that would be typed.
    /// For non-printable keys, this is empty.
    pub text: String,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(
        target: ElementId,
        key: Key,
        modifiers: KeyboardModifiers,
        text: impl Into<String>,
        is_repeat: bool,
    ) -> Self {
        Self {
            base: EventBase::new(),
            target,
            key,
            modifiers,
            text: text.into(),
            is_repeat,
        }
    }
}

/// Key release event, sent when a key is released.
#[derive(Debug, Clone)]
pub struct KeyReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The element the matching key press was dispatched on.
    pub target: ElementId,
    /// The key that was released.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl KeyReleaseEvent {
    /// Create a new key release event.
    pub fn new(target: ElementId, key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            target,
            key,
            modifiers,
        }
    }
}

/// Reason for focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusReason {
    /// Focus changed due to mouse click.
    Mouse,
    /// Focus changed due to Tab key.
    Tab,
    /// Focus changed due to Shift+Tab (backtab).
    Backtab,
    /// Focus changed programmatically.
    #[default]
    Other,
}

/// Focus in event, sent when an element receives keyboard focus.
#[derive(Debug, Clone)]
pub struct FocusInEvent {
    /// Base event data.
    pub base: EventBase,
    /// The element receiving focus.
    pub target: ElementId,
    /// The reason focus changed.
    pub reason: FocusReason,
}

impl FocusInEvent {
    /// Create a new focus in event.
    pub fn new(target: ElementId, reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            target,
            reason,
        }
    }
}

/// Focus out event, sent when an element loses keyboard focus.
#[derive(Debug, Clone)]
pub struct FocusOutEvent {
    /// Base event data.
    pub base: EventBase,
    /// The element losing focus.
    pub target: ElementId,
    /// The reason focus changed.
    pub reason: FocusReason,
}

impl FocusOutEvent {
    /// Create a new focus out event.
    pub fn new(target: ElementId, reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            target,
            reason,
        }
    }
}

/// Click event on an element.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    /// Base event data.
    pub base: EventBase,
    /// The element that was clicked.
    pub target: ElementId,
}

impl ClickEvent {
    /// Create a new click event.
    pub fn new(target: ElementId) -> Self {
        Self {
            base: EventBase::new(),
            target,
        }
    }
}

/// Paste event on a text-entry element.
#[derive(Debug, Clone)]
pub struct PasteEvent {
    /// Base event data.
    pub base: EventBase,
    /// The element receiving the paste.
    pub target: ElementId,
    /// The pasted text.
    pub text: String,
}

impl PasteEvent {
    /// Create a new paste event.
    pub fn new(target: ElementId, text: impl Into<String>) -> Self {
        Self {
            base: EventBase::new(),
            target,
            text: text.into(),
        }
    }
}

/// Submit event of a form.
#[derive(Debug, Clone)]
pub struct SubmitEvent {
    /// Base event data.
    pub base: EventBase,
    /// The form being submitted.
    pub target: ElementId,
}

impl SubmitEvent {
    /// Create a new submit event.
    pub fn new(target: ElementId) -> Self {
        Self {
            base: EventBase::new(),
            target,
        }
    }
}

/// Every event an Intake widget understands.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    /// Key pressed.
    KeyPress(KeyPressEvent),
    /// Key released.
    KeyRelease(KeyReleaseEvent),
    /// Element gained focus.
    FocusIn(FocusInEvent),
    /// Element lost focus.
    FocusOut(FocusOutEvent),
    /// Element clicked.
    Click(ClickEvent),
    /// Text pasted.
    Paste(PasteEvent),
    /// Form submitted.
    Submit(SubmitEvent),
}

impl WidgetEvent {
    /// The element this event was dispatched on.
    pub fn target(&self) -> ElementId {
        match self {
            Self::KeyPress(e) => e.target,
            Self::KeyRelease(e) => e.target,
            Self::FocusIn(e) => e.target,
            Self::FocusOut(e) => e.target,
            Self::Click(e) => e.target,
            Self::Paste(e) => e.target,
            Self::Submit(e) => e.target,
        }
    }

    /// Get the base event data.
    pub fn base(&self) -> &EventBase {
        match self {
            Self::KeyPress(e) => &e.base,
            Self::KeyRelease(e) => &e.base,
            Self::FocusIn(e) => &e.base,
            Self::FocusOut(e) => &e.base,
            Self::Click(e) => &e.base,
            Self::Paste(e) => &e.base,
            Self::Submit(e) => &e.base,
        }
    }

    /// Get mutable base event data.
    pub fn base_mut(&mut self) -> &mut EventBase {
        match self {
            Self::KeyPress(e) => &mut e.base,
            Self::KeyRelease(e) => &mut e.base,
            Self::FocusIn(e) => &mut e.base,
            Self::FocusOut(e) => &mut e.base,
            Self::Click(e) => &mut e.base,
            Self::Paste(e) => &mut e.base,
            Self::Submit(e) => &mut e.base,
        }
    }

    /// Check if the host's default action has been suppressed.
    pub fn is_default_suppressed(&self) -> bool {
        self.base().is_default_suppressed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_empty() {
        assert!(KeyboardModifiers::NONE.is_empty());
        assert!(!KeyboardModifiers::SHIFT.is_empty());
        assert_eq!(KeyboardModifiers::default(), KeyboardModifiers::NONE);
    }

    #[test]
    fn test_digit_value() {
        assert_eq!(Key::Digit7.digit_value(), Some(7));
        assert_eq!(Key::Numpad0.digit_value(), Some(0));
        assert_eq!(Key::A.digit_value(), None);
        assert!(Key::Digit3.is_digit());
        assert!(!Key::Numpad3.is_digit());
        assert!(Key::Numpad3.is_numpad());
    }

    #[test]
    fn test_suppress_default() {
        let mut event = WidgetEvent::Paste(PasteEvent::new(ElementId::default(), "123"));
        assert!(!event.is_default_suppressed());
        event.base_mut().suppress_default();
        assert!(event.is_default_suppressed());
    }
}
