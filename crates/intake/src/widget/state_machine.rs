//! Per-keystroke segment state machine.
//!
//! A keystroke is handled in two phases. [`key_down`] runs before the host
//! applies the key and decides whether that default action is allowed and
//! whether focus jumps to a neighbour. [`key_up`] runs after the host has
//! applied it, on the same segment, and decides whether the keystroke
//! completed the segment and focus should advance.
//!
//! Both phases are pure: they read a [`SegmentContext`] snapshot and return
//! a [`Decision`]. The widget applies the decision and propagates the value.
//! It clears the segment's just-gained-focus flag at key-down when the
//! segment is not full, and at the end of every key-up otherwise.
//!
//! The two character classes share the machine and differ in two places:
//!
//! - key-down of an unlisted key class is always suppressed for numeric
//!   segments, and only when full for free-text segments
//! - key-up completion checks only digit and composition keys for numeric
//!   segments, and every non-navigation key for free-text segments

use intake_core::logging::targets;

use crate::host::SelectionRange;

use super::keyboard::KeyClass;
use super::policy::CharClass;

/// Snapshot of one segment as the state machine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentContext {
    /// Character class of the segment.
    pub class: CharClass,
    /// Current content length in characters.
    pub len: usize,
    /// Maximum content length.
    pub max_length: usize,
    /// Current selection; the caret is `selection.end`.
    pub selection: SelectionRange,
    /// Whether a previous segment is linked.
    pub has_previous: bool,
    /// Whether a next segment is linked.
    pub has_next: bool,
    /// Whether focus arrived since the last key release.
    pub just_gained_focus: bool,
}

impl SegmentContext {
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_complete(&self) -> bool {
        self.len >= self.max_length
    }

    /// Whether the whole value is selected, so typing overwrites it.
    pub fn is_value_highlighted(&self) -> bool {
        self.selection.covers_all(self.len)
    }

    pub fn is_at_beginning(&self) -> bool {
        self.selection.end == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.selection.end == self.len
    }

    /// Full, with nothing selected for overwrite.
    fn is_at_capacity(&self) -> bool {
        self.is_complete() && !self.is_value_highlighted()
    }
}

/// Where focus should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    /// To the linked previous segment.
    Previous,
    /// To the linked next segment.
    Next,
}

/// What the widget must do in response to one phase of a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decision {
    /// Suppress the host's default action.
    pub suppress_default: bool,
    /// Move focus to a neighbour.
    pub focus: Option<FocusMove>,
    /// Recompute the segment's display width.
    pub refresh_width: bool,
}

impl Decision {
    /// Allow the default action and do nothing else.
    pub const ALLOW: Self = Self {
        suppress_default: false,
        focus: None,
        refresh_width: false,
    };

    /// Suppress the default action.
    pub const SUPPRESS: Self = Self {
        suppress_default: true,
        focus: None,
        refresh_width: false,
    };

    fn jump(target: FocusMove) -> Self {
        Self {
            suppress_default: true,
            focus: Some(target),
            refresh_width: false,
        }
    }
}

/// Decide the key-down phase.
pub fn key_down(ctx: &SegmentContext, key: KeyClass) -> Decision {
    let decision = match key {
        KeyClass::ShiftTab if ctx.has_previous => Decision::jump(FocusMove::Previous),
        KeyClass::Tab if ctx.has_next => Decision::jump(FocusMove::Next),
        KeyClass::ShiftTab | KeyClass::Tab => Decision::ALLOW,

        KeyClass::UpArrow | KeyClass::DownArrow => Decision::SUPPRESS,

        KeyClass::LeftArrow if ctx.has_previous && (ctx.is_empty() || ctx.is_at_beginning()) => {
            Decision::jump(FocusMove::Previous)
        }
        KeyClass::RightArrow if ctx.has_next && (ctx.is_empty() || ctx.is_at_end()) => {
            Decision::jump(FocusMove::Next)
        }
        KeyClass::LeftArrow | KeyClass::RightArrow => Decision::ALLOW,

        KeyClass::Delete => Decision::ALLOW,

        // Nothing to delete; the default action is harmless.
        KeyClass::Backspace if ctx.is_empty() && ctx.has_previous => Decision {
            focus: Some(FocusMove::Previous),
            ..Decision::ALLOW
        },
        KeyClass::Backspace => Decision::ALLOW,

        KeyClass::DigitKey | KeyClass::CompositionInput if ctx.class == CharClass::Numeric => {
            if ctx.is_at_capacity() {
                Decision::SUPPRESS
            } else {
                Decision::ALLOW
            }
        }

        _ if ctx.class.rejects_unlisted() => Decision::SUPPRESS,
        _ if ctx.is_at_capacity() => Decision::SUPPRESS,
        _ => Decision::ALLOW,
    };

    tracing::trace!(
        target: targets::KEYS,
        ?key,
        class = %ctx.class,
        len = ctx.len,
        max_length = ctx.max_length,
        suppress = decision.suppress_default,
        focus = ?decision.focus,
        "key down"
    );
    decision
}

/// Decide the key-up phase.
///
/// `ctx` describes the segment after the host applied the key and after the
/// content was trimmed to its maximum length.
pub fn key_up(ctx: &SegmentContext, key: KeyClass) -> Decision {
    let decision = if key.is_navigation() {
        Decision::ALLOW
    } else if key == KeyClass::Backspace {
        Decision {
            refresh_width: ctx.class == CharClass::Numeric && ctx.is_empty(),
            ..Decision::ALLOW
        }
    } else if ctx.class.completes_on(key) && ctx.is_at_capacity() {
        Decision {
            focus: (!ctx.just_gained_focus && ctx.has_next).then_some(FocusMove::Next),
            ..Decision::SUPPRESS
        }
    } else {
        Decision::ALLOW
    };

    tracing::trace!(
        target: targets::KEYS,
        ?key,
        class = %ctx.class,
        len = ctx.len,
        just_gained_focus = ctx.just_gained_focus,
        suppress = decision.suppress_default,
        focus = ?decision.focus,
        "key up"
    );
    decision
}
