//! Key classification for segment editing.
//!
//! Every key event a segment receives is reduced to one [`KeyClass`] before
//! the state machine looks at it. Hosts that only know legacy DOM key codes
//! can build a [`Key`] with [`Key::from_key_code`].

use super::events::{Key, KeyboardModifiers};

/// The symbolic class of a key, as seen by the segment state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyClass {
    Backspace,
    Tab,
    ShiftTab,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    Delete,
    /// A digit on the main keyboard or the numpad.
    DigitKey,
    /// Input-method composition; the produced character is unknown.
    CompositionInput,
    /// Anything not listed above.
    Other,
}

impl KeyClass {
    /// Classify a key.
    ///
    /// With Shift held only Tab is recognised (as [`KeyClass::ShiftTab`]);
    /// every other shifted key is [`KeyClass::Other`].
    pub fn classify(key: Key, modifiers: KeyboardModifiers) -> Self {
        if modifiers.shift {
            return match key {
                Key::Tab => KeyClass::ShiftTab,
                _ => KeyClass::Other,
            };
        }

        match key {
            Key::Backspace => KeyClass::Backspace,
            Key::Tab => KeyClass::Tab,
            Key::ArrowLeft => KeyClass::LeftArrow,
            Key::ArrowUp => KeyClass::UpArrow,
            Key::ArrowRight => KeyClass::RightArrow,
            Key::ArrowDown => KeyClass::DownArrow,
            Key::Delete => KeyClass::Delete,
            Key::Process => KeyClass::CompositionInput,
            Key::Character(c) if c.is_ascii_digit() => KeyClass::DigitKey,
            k if k.digit_value().is_some() => KeyClass::DigitKey,
            _ => KeyClass::Other,
        }
    }

    /// Whether this class moves focus on key-down and needs no key-up work.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            KeyClass::ShiftTab | KeyClass::LeftArrow | KeyClass::Tab | KeyClass::RightArrow
        )
    }
}

impl Key {
    /// Convert a legacy DOM key code (`KeyboardEvent.keyCode`).
    ///
    /// Code 229 is what browsers report while an input method is composing
    /// and maps to [`Key::Process`].
    pub fn from_key_code(code: u32) -> Self {
        const LETTERS: [Key; 26] = [
            Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
            Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
            Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
        ];
        const DIGITS: [Key; 10] = [
            Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
            Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
        ];
        const NUMPAD: [Key; 10] = [
            Key::Numpad0, Key::Numpad1, Key::Numpad2, Key::Numpad3, Key::Numpad4,
            Key::Numpad5, Key::Numpad6, Key::Numpad7, Key::Numpad8, Key::Numpad9,
        ];

        match code {
            8 => Key::Backspace,
            9 => Key::Tab,
            13 => Key::Enter,
            27 => Key::Escape,
            32 => Key::Space,
            33 => Key::PageUp,
            34 => Key::PageDown,
            35 => Key::End,
            36 => Key::Home,
            37 => Key::ArrowLeft,
            38 => Key::ArrowUp,
            39 => Key::ArrowRight,
            40 => Key::ArrowDown,
            45 => Key::Insert,
            46 => Key::Delete,
            48..=57 => DIGITS[(code - 48) as usize],
            65..=90 => LETTERS[(code - 65) as usize],
            96..=105 => NUMPAD[(code - 96) as usize],
            229 => Key::Process,
            other => Key::Unknown(u16::try_from(other).unwrap_or(u16::MAX)),
        }
    }

    /// The text a printable key produces with the given modifiers.
    ///
    /// Letters are lowercase unless Shift is held. Returns `None` for
    /// non-printable keys.
    pub fn text(&self, modifiers: KeyboardModifiers) -> Option<String> {
        if let Some(digit) = self.digit_value() {
            return char::from_digit(digit, 10).map(String::from);
        }
        let c = match self {
            Key::Space => ' ',
            Key::Character(c) => *c,
            letter => {
                let index = letter_index(letter)?;
                let base = if modifiers.shift { b'A' } else { b'a' };
                char::from(base + index)
            }
        };
        Some(c.to_string())
    }
}

fn letter_index(key: &Key) -> Option<u8> {
    let index = match key {
        Key::A => 0,
        Key::B => 1,
        Key::C => 2,
        Key::D => 3,
        Key::E => 4,
        Key::F => 5,
        Key::G => 6,
        Key::H => 7,
        Key::I => 8,
        Key::J => 9,
        Key::K => 10,
        Key::L => 11,
        Key::M => 12,
        Key::N => 13,
        Key::O => 14,
        Key::P => 15,
        Key::Q => 16,
        Key::R => 17,
        Key::S => 18,
        Key::T => 19,
        Key::U => 20,
        Key::V => 21,
        Key::W => 22,
        Key::X => 23,
        Key::Y => 24,
        Key::Z => 25,
        _ => return None,
    };
    Some(index)
}
