//! Keystroke handling and focus movement between segments.

mod common;

use common::Session;
use intake::prelude::*;

#[test]
fn test_completing_a_segment_advances_focus() {
    let mut s = Session::phone("");
    s.click_segment(0);
    assert_eq!(s.focused_segment(), Some(0));

    let strokes = s.type_text("555");
    assert_eq!(s.values(), vec!["555", "", ""]);
    assert_eq!(s.focused_segment(), Some(1));

    let last = strokes[2];
    assert!(!last.down_suppressed);
    assert!(last.up_suppressed);
    assert!(!strokes[0].up_suppressed);
}

#[test]
fn test_typing_a_full_phone_number() {
    let mut s = Session::phone("");
    s.click_segment(0);
    s.type_text("5551234567");

    assert_eq!(s.values(), vec!["555", "123", "4567"]);
    assert_eq!(s.focused_segment(), Some(2));
    assert_eq!(s.intake.assembled_value(), "(555)123-4567");
    assert_eq!(s.hidden_value(), "5551234567");
}

#[test]
fn test_full_last_segment_rejects_more_digits() {
    let mut s = Session::date("");
    s.click_segment(0);
    s.type_text("01022023");
    assert_eq!(s.focused_segment(), Some(2));

    let stroke = s.press(Key::Digit9);
    assert!(stroke.down_suppressed);
    assert_eq!(s.values(), vec!["01", "02", "2023"]);
    assert_eq!(s.focused_segment(), Some(2));
}

#[test]
fn test_backspace_on_empty_segment_goes_back_without_editing() {
    let mut s = Session::date("");
    s.click_segment(0);
    s.type_text("12");
    assert_eq!(s.focused_segment(), Some(1));

    let stroke = s.press(Key::Backspace);
    assert!(!stroke.down_suppressed);
    assert_eq!(s.focused_segment(), Some(0));
    assert_eq!(s.values(), vec!["12", "", ""]);
}

#[test]
fn test_backspace_deletes_inside_segment() {
    let mut s = Session::date("");
    s.click_segment(0);
    s.type_text("1");
    s.press(Key::Backspace);

    assert_eq!(s.values(), vec!["", "", ""]);
    assert_eq!(s.focused_segment(), Some(0));
    assert_eq!(
        s.doc.style(s.segment(0), "width").as_deref(),
        Some("23.1px")
    );
}

#[test]
fn test_selected_full_segment_accepts_overwrite() {
    let mut s = Session::date("12/25/2023");
    s.click_segment(0);
    s.select_all();

    let stroke = s.press(Key::Digit7);
    assert!(!stroke.down_suppressed);
    assert_eq!(s.values()[0], "7");
    assert_eq!(s.focused_segment(), Some(0));
}

#[test]
fn test_full_segment_without_selection_rejects_digit() {
    let mut s = Session::date("12/25/2023");
    s.click_segment(1);
    s.set_caret(2);

    let stroke = s.press(Key::Digit7);
    assert!(stroke.down_suppressed);
    assert_eq!(s.values()[1], "25");
}

#[test]
fn test_just_gained_focus_blocks_immediate_advance() {
    let mut s = Session::phone("5551234567");
    s.click_segment(0);
    assert!(s.intake.group().segments().next().unwrap().has_just_gained_focus());

    s.press(Key::Digit9);
    assert_eq!(s.focused_segment(), Some(0));
    assert!(!s.intake.group().segments().next().unwrap().has_just_gained_focus());

    s.press(Key::Digit9);
    assert_eq!(s.focused_segment(), Some(1));
    assert_eq!(s.values(), vec!["555", "123", "4567"]);
}

#[test]
fn test_single_character_segments_advance_on_first_keystroke() {
    let mut s = Session::build(DateOptions::new("M/D/YYYY", "/"), "");
    s.click_segment(0);
    s.type_text("122023");

    assert_eq!(s.values(), vec!["1", "2", "2023"]);
    assert_eq!(s.focused_segment(), Some(2));
    assert_eq!(s.hidden_value(), "1/2/2023");
}

#[test]
fn test_tabbing_into_full_segment_holds_first_digit() {
    let mut s = Session::date("01/02/2023");
    s.click_segment(0);
    s.press(Key::Tab);
    assert_eq!(s.focused_segment(), Some(1));

    let first = s.press(Key::Digit5);
    assert!(first.down_suppressed);
    assert_eq!(s.focused_segment(), Some(1));

    s.press(Key::Digit5);
    assert_eq!(s.focused_segment(), Some(2));
    assert_eq!(s.values(), vec!["01", "02", "2023"]);
}

#[test]
fn test_tab_and_shift_tab_move_between_segments() {
    let mut s = Session::date("");
    s.click_segment(0);

    assert!(s.press(Key::Tab).down_suppressed);
    assert_eq!(s.focused_segment(), Some(1));
    assert!(s.press(Key::Tab).down_suppressed);
    assert_eq!(s.focused_segment(), Some(2));

    // No next segment: the host's own tab traversal takes over.
    assert!(!s.press(Key::Tab).down_suppressed);
    assert_eq!(s.focused_segment(), Some(2));

    let stroke = s.press_with(Key::Tab, KeyboardModifiers::SHIFT, None);
    assert!(stroke.down_suppressed);
    assert_eq!(s.focused_segment(), Some(1));
}

#[test]
fn test_shift_tab_on_first_segment_is_left_to_host() {
    let mut s = Session::date("");
    s.click_segment(0);
    let stroke = s.press_with(Key::Tab, KeyboardModifiers::SHIFT, None);
    assert!(!stroke.down_suppressed);
    assert_eq!(s.focused_segment(), Some(0));
}

#[test]
fn test_arrows_move_at_boundaries() {
    let mut s = Session::date("");
    s.click_segment(0);
    s.type_text("01");
    s.type_text("0");
    assert_eq!(s.focused_segment(), Some(1));

    // Caret after "0": first Left moves the caret, second leaves the segment.
    assert!(!s.press(Key::ArrowLeft).down_suppressed);
    assert_eq!(s.focused_segment(), Some(1));
    assert!(s.press(Key::ArrowLeft).down_suppressed);
    assert_eq!(s.focused_segment(), Some(0));

    s.set_caret(1);
    assert!(!s.press(Key::ArrowRight).down_suppressed);
    assert_eq!(s.focused_segment(), Some(0));
    assert!(s.press(Key::ArrowRight).down_suppressed);
    assert_eq!(s.focused_segment(), Some(1));

    // Empty segment: Right always moves.
    s.press(Key::Tab);
    assert_eq!(s.focused_segment(), Some(2));
    assert!(!s.press(Key::ArrowRight).down_suppressed);
    assert_eq!(s.focused_segment(), Some(2));
    assert!(s.press(Key::ArrowLeft).down_suppressed);
    assert_eq!(s.focused_segment(), Some(1));
}

#[test]
fn test_vertical_arrows_are_suppressed() {
    let mut s = Session::postal("Canada", "");
    s.click_segment(0);
    assert!(s.press(Key::ArrowUp).down_suppressed);
    assert!(s.press(Key::ArrowDown).down_suppressed);
}

#[test]
fn test_numeric_segment_rejects_non_digits() {
    let mut s = Session::date("");
    s.click_segment(0);
    for stroke in s.type_text("a-Z !") {
        assert!(stroke.down_suppressed);
    }
    assert_eq!(s.values(), vec!["", "", ""]);

    let stroke = s.press_with(Key::Digit1, KeyboardModifiers::SHIFT, Some("!"));
    assert!(stroke.down_suppressed);
    assert_eq!(s.values()[0], "");
}

#[test]
fn test_numpad_digits_are_accepted() {
    let mut s = Session::postal("USA", "");
    s.click_segment(0);
    for key in [Key::Numpad9, Key::Numpad0, Key::Numpad2, Key::Numpad1, Key::Numpad0] {
        s.press(key);
    }
    assert_eq!(s.values(), vec!["90210"]);
}

#[test]
fn test_composition_input_completes_numeric_segment() {
    let mut s = Session::phone("");
    s.click_segment(0);
    s.type_text("55");

    let stroke = s.press_with(Key::Process, KeyboardModifiers::NONE, Some("5"));
    assert!(!stroke.down_suppressed);
    assert!(stroke.up_suppressed);
    assert_eq!(s.values()[0], "555");
    assert_eq!(s.focused_segment(), Some(1));
}

#[test]
fn test_composition_of_non_digit_is_dropped_at_release() {
    let mut s = Session::phone("");
    s.click_segment(0);
    s.press_with(Key::Process, KeyboardModifiers::NONE, Some("x"));

    assert_eq!(s.values()[0], "");
    assert_eq!(s.doc.value(s.segment(0)), "");
}

#[test]
fn test_free_text_postal_code() {
    let mut s = Session::postal("Canada", "");
    s.click_segment(0);
    let strokes = s.type_text("K1A 0B1");

    assert_eq!(s.values(), vec!["K1A 0B"]);
    assert!(strokes[5].up_suppressed);
    assert!(strokes[6].down_suppressed);
    assert_eq!(s.focused_segment(), Some(0));
    assert_eq!(s.hidden_value(), "K1A 0B");
}

#[test]
fn test_free_text_allows_overwrite_when_selected() {
    let mut s = Session::postal("Canada", "K1A0B1");
    s.click_segment(0);
    s.select_all();

    let stroke = s.press_with(Key::H, KeyboardModifiers::SHIFT, None);
    assert!(!stroke.down_suppressed);
    assert_eq!(s.values(), vec!["H"]);
}

#[test]
fn test_delete_is_left_to_host() {
    let mut s = Session::date("12/25/2023");
    s.click_segment(2);
    s.set_caret(0);

    let stroke = s.press(Key::Delete);
    assert!(!stroke.down_suppressed);
    assert_eq!(s.values()[2], "023");
}
