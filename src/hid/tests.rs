//! Unit tests for the layout table and keyboard report encoding.
//!
//! These tests run on the host (not embedded) and verify the pure
//! character → key stroke → report path.

use super::keyboard::{KeyboardReport, KEYBOARD_REPORT_MAP, KEYBOARD_REPORT_SIZE};
use super::keycodes::modifier::{LEFT_SHIFT, NONE, RIGHT_ALT};
use super::keycodes::*;
use super::layout::{lookup, translate, KeyStroke, RuleKind};

fn cp(c: char) -> u32 {
    c as u32
}

fn stroke(modifier: u8, keycode: u8) -> Option<KeyStroke> {
    Some(KeyStroke::new(modifier, keycode))
}

// ═══════════════════════════════════════════════════════════════════════════
// Layout: control keys and digits
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn newline_and_carriage_return_are_enter() {
    assert_eq!(translate(cp('\n')), stroke(NONE, KEY_ENTER));
    assert_eq!(translate(cp('\r')), stroke(NONE, KEY_ENTER));
}

#[test]
fn tab_and_space() {
    assert_eq!(translate(cp('\t')), stroke(NONE, KEY_TAB));
    assert_eq!(translate(cp(' ')), stroke(NONE, KEY_SPACE));
}

#[test]
fn digits_one_to_nine_are_sequential() {
    for (i, c) in ('1'..='9').enumerate() {
        assert_eq!(translate(cp(c)), stroke(NONE, KEY_1 + i as u8), "{c}");
    }
    assert_eq!(translate(cp('9')), stroke(NONE, KEY_9));
}

#[test]
fn zero_has_its_own_keycode() {
    assert_eq!(translate(cp('0')), stroke(NONE, KEY_0));
    // Not the start of the digit run.
    assert_ne!(translate(cp('0')), stroke(NONE, KEY_1 - 1));
}

// ═══════════════════════════════════════════════════════════════════════════
// Layout: letters (QWERTZ)
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn lowercase_letters_follow_us_key_order() {
    assert_eq!(translate(cp('a')), stroke(NONE, KEY_A));
    assert_eq!(translate(cp('e')), stroke(NONE, KEY_E));
    assert_eq!(translate(cp('x')), stroke(NONE, KEY_A + 23));
}

#[test]
fn y_and_z_are_swapped() {
    assert_eq!(translate(cp('y')), stroke(NONE, KEY_Z));
    assert_eq!(translate(cp('z')), stroke(NONE, KEY_Y));
}

#[test]
fn uppercase_adds_left_shift_including_swap() {
    assert_eq!(translate(cp('A')), stroke(LEFT_SHIFT, KEY_A));
    assert_eq!(translate(cp('Y')), stroke(LEFT_SHIFT, KEY_Z));
    assert_eq!(translate(cp('Z')), stroke(LEFT_SHIFT, KEY_Y));

    for (lower, upper) in ('a'..='z').zip('A'..='Z') {
        let l = translate(cp(lower)).unwrap();
        let u = translate(cp(upper)).unwrap();
        assert_eq!(l.keycode, u.keycode, "{lower}/{upper}");
        assert_eq!(l.modifier, NONE);
        assert_eq!(u.modifier, LEFT_SHIFT);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Layout: national characters and punctuation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn umlauts_and_sharp_s() {
    assert_eq!(translate(cp('ä')), stroke(NONE, KEY_APOSTROPHE));
    assert_eq!(translate(cp('Ä')), stroke(LEFT_SHIFT, KEY_APOSTROPHE));
    assert_eq!(translate(cp('ö')), stroke(NONE, KEY_SEMICOLON));
    assert_eq!(translate(cp('Ö')), stroke(LEFT_SHIFT, KEY_SEMICOLON));
    assert_eq!(translate(cp('ü')), stroke(NONE, KEY_LEFT_BRACKET));
    assert_eq!(translate(cp('Ü')), stroke(LEFT_SHIFT, KEY_LEFT_BRACKET));
    assert_eq!(translate(cp('ß')), stroke(NONE, KEY_MINUS));
}

#[test]
fn euro_is_alt_gr_e() {
    let euro = translate(0x20AC).unwrap();
    assert_eq!(euro.modifier, RIGHT_ALT);
    assert_eq!(euro.keycode, translate(cp('e')).unwrap().keycode);
    assert_eq!(euro.keycode, translate(cp('E')).unwrap().keycode);
}

#[test]
fn shifted_punctuation() {
    assert_eq!(translate(cp('!')), stroke(LEFT_SHIFT, KEY_1));
    assert_eq!(translate(cp('"')), stroke(LEFT_SHIFT, KEY_2));
    assert_eq!(translate(cp('(')), stroke(LEFT_SHIFT, KEY_8));
    assert_eq!(translate(cp(')')), stroke(LEFT_SHIFT, KEY_9));
    assert_eq!(translate(cp('?')), stroke(LEFT_SHIFT, KEY_MINUS));
    assert_eq!(translate(cp('_')), stroke(LEFT_SHIFT, KEY_SLASH));
    assert_eq!(translate(cp('*')), stroke(LEFT_SHIFT, KEY_RIGHT_BRACKET));
    assert_eq!(translate(cp(':')), stroke(LEFT_SHIFT, KEY_PERIOD));
    assert_eq!(translate(cp(';')), stroke(LEFT_SHIFT, KEY_COMMA));
    assert_eq!(translate(cp('>')), stroke(LEFT_SHIFT, KEY_NON_US_BACKSLASH));
}

#[test]
fn unshifted_punctuation() {
    assert_eq!(translate(cp('.')), stroke(NONE, KEY_PERIOD));
    assert_eq!(translate(cp(',')), stroke(NONE, KEY_COMMA));
    assert_eq!(translate(cp('-')), stroke(NONE, KEY_SLASH));
    assert_eq!(translate(cp('+')), stroke(NONE, KEY_RIGHT_BRACKET));
    assert_eq!(translate(cp('=')), stroke(NONE, KEY_EQUAL));
    assert_eq!(translate(cp('#')), stroke(NONE, KEY_BACKSLASH));
    assert_eq!(translate(cp('<')), stroke(NONE, KEY_NON_US_BACKSLASH));
}

#[test]
fn alt_gr_punctuation() {
    assert_eq!(translate(cp('\\')), stroke(RIGHT_ALT, KEY_MINUS));
    assert_eq!(translate(cp('[')), stroke(RIGHT_ALT, KEY_8));
    assert_eq!(translate(cp(']')), stroke(RIGHT_ALT, KEY_9));
    assert_eq!(translate(cp('{')), stroke(RIGHT_ALT, KEY_7));
    assert_eq!(translate(cp('}')), stroke(RIGHT_ALT, KEY_0));
    assert_eq!(translate(cp('|')), stroke(RIGHT_ALT, KEY_NON_US_BACKSLASH));
    assert_eq!(translate(cp('/')), stroke(RIGHT_ALT, KEY_7));
    assert_eq!(translate(cp('\'')), stroke(RIGHT_ALT, KEY_BACKSLASH));
}

#[test]
fn unmapped_code_points() {
    for c in ['@', '$', '%', '&', '~', '`', '^', 'é', 'ñ', '😀', '\u{0}', '\u{7F}'] {
        assert_eq!(translate(cp(c)), None, "{c:?}");
    }
    assert_eq!(translate(0x10FFFF), None);
}

#[test]
fn translate_is_pure() {
    for c in (0u32..0x300).chain([0x20AC, 0x1F600]) {
        assert_eq!(translate(c), translate(c));
    }
}

#[test]
fn every_mapping_uses_layout_modifiers_and_declared_keys() {
    for c in 0u32..0x2100 {
        if let Some(s) = translate(c) {
            assert!(
                [NONE, LEFT_SHIFT, RIGHT_ALT].contains(&s.modifier),
                "U+{c:04X}"
            );
            assert!((KEY_A..=KEY_MAX).contains(&s.keycode), "U+{c:04X}");
        }
    }
}

#[test]
fn rule_kinds() {
    assert_eq!(lookup(cp('\n')).map(|r| r.0), Some(RuleKind::Control));
    assert_eq!(lookup(cp('0')).map(|r| r.0), Some(RuleKind::Digit));
    assert_eq!(lookup(cp('y')).map(|r| r.0), Some(RuleKind::Lowercase));
    assert_eq!(lookup(cp('Z')).map(|r| r.0), Some(RuleKind::Uppercase));
    assert_eq!(lookup(0x20AC).map(|r| r.0), Some(RuleKind::National));
    assert_eq!(lookup(cp('|')).map(|r| r.0), Some(RuleKind::Punctuation));
    assert_eq!(lookup(cp('@')), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn keyboard_report_empty() {
    let report = KeyboardReport::empty();
    assert!(report.is_empty());
    assert_eq!(report.to_bytes(), [0; KEYBOARD_REPORT_SIZE]);
}

#[test]
fn keyboard_report_press_layout() {
    let report = KeyboardReport::press(KeyStroke::new(LEFT_SHIFT, KEY_A));
    assert_eq!(report.to_bytes(), [0x02, 0x00, 0x04, 0, 0, 0, 0, 0]);
    assert!(!report.is_empty());
}

#[test]
fn keyboard_report_chord_pads_and_truncates() {
    let report = KeyboardReport::chord(RIGHT_ALT, &[KEY_E, KEY_1]);
    assert_eq!(report.to_bytes(), [0x40, 0x00, 0x08, 0x1E, 0, 0, 0, 0]);

    let report = KeyboardReport::chord(NONE, &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(report.keycodes, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn keyboard_report_serialize_buffer_too_small() {
    let report = KeyboardReport::empty();
    let mut small_buf = [0u8; 4];
    assert_eq!(report.serialize(&mut small_buf), 0);
}

#[test]
fn report_map_declares_report_id_and_key_range() {
    // Report ID item follows the application collection.
    assert_eq!(&KEYBOARD_REPORT_MAP[6..8], &[0x85, 0x01]);
    // Logical Maximum of the key array matches the highest keycode we send.
    let key_max = KEYBOARD_REPORT_MAP
        .windows(2)
        .filter(|w| w[0] == 0x25)
        .last()
        .map(|w| w[1]);
    assert_eq!(key_max, Some(KEY_MAX));
    assert_eq!(KEYBOARD_REPORT_MAP.last(), Some(&0xC0));
}
