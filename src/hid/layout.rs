//! Code point → key stroke translation for the German (DE, QWERTZ) layout.
//!
//! The host is assumed to run a German keyboard layout, so every character
//! is expressed as the *physical* key (US key cap naming) plus the modifiers
//! a German typist would hold. The table is an ordered list of rules;
//! the first rule that matches wins:
//!
//! | # | Kind        | Covers                          | Notes                          |
//! |---|-------------|---------------------------------|--------------------------------|
//! | 1 | Control     | `\n` `\r` `\t` space            |                                |
//! | 2 | Digit       | `1`..`9`, then `0`              | `0` is after `9`, own keycode  |
//! | 3 | Lowercase   | `a`..`z`                        | `y`/`z` swapped (QWERTZ)       |
//! | 4 | Uppercase   | `A`..`Z`                        | as lowercase + Left Shift      |
//! | 5 | National    | `ä ö ü Ä Ö Ü ß €`               | `€` needs AltGr                |
//! | 6 | Punctuation | ASCII symbols                   | several need AltGr             |
//!
//! Anything else is unmapped.

use super::keycodes::modifier::{LEFT_SHIFT, NONE, RIGHT_ALT};
use super::keycodes::*;

/// One physical key plus the modifiers held with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyStroke {
    /// Modifier bitfield (see [`super::keycodes::modifier`]).
    pub modifier: u8,
    /// HID usage ID of the key.
    pub keycode: u8,
}

impl KeyStroke {
    pub const fn new(modifier: u8, keycode: u8) -> Self {
        Self { modifier, keycode }
    }

    const fn plain(keycode: u8) -> Self {
        Self::new(NONE, keycode)
    }

    const fn shifted(keycode: u8) -> Self {
        Self::new(LEFT_SHIFT, keycode)
    }

    const fn alt_gr(keycode: u8) -> Self {
        Self::new(RIGHT_ALT, keycode)
    }
}

/// Which rule of the layout a code point was matched by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RuleKind {
    Control,
    Digit,
    Lowercase,
    Uppercase,
    National,
    Punctuation,
}

enum Matcher {
    /// `first..=last` maps onto consecutive keycodes starting at `keycode`.
    Run {
        first: char,
        last: char,
        keycode: u8,
        modifier: u8,
    },
    /// Explicit code point → stroke pairs.
    Table(&'static [(char, KeyStroke)]),
}

impl Matcher {
    fn apply(&self, cp: u32) -> Option<KeyStroke> {
        match *self {
            Matcher::Run {
                first,
                last,
                keycode,
                modifier,
            } => {
                let (first, last) = (first as u32, last as u32);
                (first..=last)
                    .contains(&cp)
                    .then(|| KeyStroke::new(modifier, keycode + (cp - first) as u8))
            }
            Matcher::Table(entries) => entries
                .iter()
                .find(|(ch, _)| *ch as u32 == cp)
                .map(|&(_, stroke)| stroke),
        }
    }
}

struct Rule {
    kind: RuleKind,
    matcher: Matcher,
}

const CONTROL: &[(char, KeyStroke)] = &[
    ('\n', KeyStroke::plain(KEY_ENTER)),
    ('\r', KeyStroke::plain(KEY_ENTER)),
    ('\t', KeyStroke::plain(KEY_TAB)),
    (' ', KeyStroke::plain(KEY_SPACE)),
];

const ZERO: &[(char, KeyStroke)] = &[('0', KeyStroke::plain(KEY_0))];

// QWERTZ: the key labelled Y on a US board produces `z` and vice versa.
const LOWER_SWAPPED: &[(char, KeyStroke)] = &[
    ('y', KeyStroke::plain(KEY_Z)),
    ('z', KeyStroke::plain(KEY_Y)),
];

const UPPER_SWAPPED: &[(char, KeyStroke)] = &[
    ('Y', KeyStroke::shifted(KEY_Z)),
    ('Z', KeyStroke::shifted(KEY_Y)),
];

const NATIONAL: &[(char, KeyStroke)] = &[
    ('ä', KeyStroke::plain(KEY_APOSTROPHE)),
    ('Ä', KeyStroke::shifted(KEY_APOSTROPHE)),
    ('ö', KeyStroke::plain(KEY_SEMICOLON)),
    ('Ö', KeyStroke::shifted(KEY_SEMICOLON)),
    ('ü', KeyStroke::plain(KEY_LEFT_BRACKET)),
    ('Ü', KeyStroke::shifted(KEY_LEFT_BRACKET)),
    ('ß', KeyStroke::plain(KEY_MINUS)),
    ('€', KeyStroke::alt_gr(KEY_E)),
];

const PUNCTUATION: &[(char, KeyStroke)] = &[
    ('.', KeyStroke::plain(KEY_PERIOD)),
    (',', KeyStroke::plain(KEY_COMMA)),
    ('-', KeyStroke::plain(KEY_SLASH)),
    ('_', KeyStroke::shifted(KEY_SLASH)),
    ('+', KeyStroke::plain(KEY_RIGHT_BRACKET)),
    ('*', KeyStroke::shifted(KEY_RIGHT_BRACKET)),
    (':', KeyStroke::shifted(KEY_PERIOD)),
    (';', KeyStroke::shifted(KEY_COMMA)),
    ('!', KeyStroke::shifted(KEY_1)),
    ('?', KeyStroke::shifted(KEY_MINUS)),
    ('=', KeyStroke::plain(KEY_EQUAL)),
    ('/', KeyStroke::alt_gr(KEY_7)),
    ('\\', KeyStroke::alt_gr(KEY_MINUS)),
    ('#', KeyStroke::plain(KEY_BACKSLASH)),
    ('"', KeyStroke::shifted(KEY_2)),
    ('\'', KeyStroke::alt_gr(KEY_BACKSLASH)),
    ('(', KeyStroke::shifted(KEY_8)),
    (')', KeyStroke::shifted(KEY_9)),
    ('[', KeyStroke::alt_gr(KEY_8)),
    (']', KeyStroke::alt_gr(KEY_9)),
    ('{', KeyStroke::alt_gr(KEY_7)),
    ('}', KeyStroke::alt_gr(KEY_0)),
    ('<', KeyStroke::plain(KEY_NON_US_BACKSLASH)),
    ('>', KeyStroke::shifted(KEY_NON_US_BACKSLASH)),
    ('|', KeyStroke::alt_gr(KEY_NON_US_BACKSLASH)),
];

/// Rules in precedence order. Exception tables sit before the run they
/// carve out of.
const RULES: &[Rule] = &[
    Rule {
        kind: RuleKind::Control,
        matcher: Matcher::Table(CONTROL),
    },
    Rule {
        kind: RuleKind::Digit,
        matcher: Matcher::Run {
            first: '1',
            last: '9',
            keycode: KEY_1,
            modifier: NONE,
        },
    },
    Rule {
        kind: RuleKind::Digit,
        matcher: Matcher::Table(ZERO),
    },
    Rule {
        kind: RuleKind::Lowercase,
        matcher: Matcher::Table(LOWER_SWAPPED),
    },
    Rule {
        kind: RuleKind::Lowercase,
        matcher: Matcher::Run {
            first: 'a',
            last: 'z',
            keycode: KEY_A,
            modifier: NONE,
        },
    },
    Rule {
        kind: RuleKind::Uppercase,
        matcher: Matcher::Table(UPPER_SWAPPED),
    },
    Rule {
        kind: RuleKind::Uppercase,
        matcher: Matcher::Run {
            first: 'A',
            last: 'Z',
            keycode: KEY_A,
            modifier: LEFT_SHIFT,
        },
    },
    Rule {
        kind: RuleKind::National,
        matcher: Matcher::Table(NATIONAL),
    },
    Rule {
        kind: RuleKind::Punctuation,
        matcher: Matcher::Table(PUNCTUATION),
    },
];

/// Find the first matching rule for `cp`.
pub fn lookup(cp: u32) -> Option<(RuleKind, KeyStroke)> {
    RULES
        .iter()
        .find_map(|rule| rule.matcher.apply(cp).map(|stroke| (rule.kind, stroke)))
}

/// Translate a code point into the key stroke that types it on a German
/// layout. `None` means the character is not on the layout.
pub fn translate(cp: u32) -> Option<KeyStroke> {
    lookup(cp).map(|(_, stroke)| stroke)
}
