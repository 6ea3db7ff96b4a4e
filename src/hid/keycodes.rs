//! Keyboard/Keypad usage IDs (HID usage page 0x07) and modifier bits.
//!
//! Only the keys reachable from the German layout table are listed.
//! Values follow the USB HID Usage Tables, section 10.

// Letters (0x04-0x1D) - named after the US key cap at that position.
/// `A`; first of the 26 consecutive letter usages.
pub const KEY_A: u8 = 0x04;
/// `E` (AltGr gives `€` on DE).
pub const KEY_E: u8 = 0x08;
/// US `Y` position, which types `z` on QWERTZ.
pub const KEY_Y: u8 = 0x1C;
/// US `Z` position, which types `y` on QWERTZ.
pub const KEY_Z: u8 = 0x1D;

// Number row (0x1E-0x27); `0` sits after `9`, not before `1`.
/// `1` / `!`; first of the `1`..`9` run.
pub const KEY_1: u8 = 0x1E;
/// `2` / `"`.
pub const KEY_2: u8 = 0x1F;
/// `7` / `/`; AltGr gives `{`.
pub const KEY_7: u8 = 0x24;
/// `8` / `(`; AltGr gives `[`.
pub const KEY_8: u8 = 0x25;
/// `9` / `)`; AltGr gives `]`.
pub const KEY_9: u8 = 0x26;
/// `0` / `=`; AltGr gives `}`.
pub const KEY_0: u8 = 0x27;

// Control keys
/// Return.
pub const KEY_ENTER: u8 = 0x28;
/// Tab.
pub const KEY_TAB: u8 = 0x2B;
/// Space bar.
pub const KEY_SPACE: u8 = 0x2C;

// Punctuation (US key cap names)
/// US `-` position: `ß` / `?` on DE.
pub const KEY_MINUS: u8 = 0x2D;
/// US `=` position: dead key `´` on DE.
pub const KEY_EQUAL: u8 = 0x2E;
/// US `[` position: `ü` / `Ü` on DE.
pub const KEY_LEFT_BRACKET: u8 = 0x2F;
/// US `]` position: `+` / `*` on DE.
pub const KEY_RIGHT_BRACKET: u8 = 0x30;
/// US `\` position: `#` / `'` on DE.
pub const KEY_BACKSLASH: u8 = 0x31;
/// US `;` position: `ö` / `Ö` on DE.
pub const KEY_SEMICOLON: u8 = 0x33;
/// US `'` position: `ä` / `Ä` on DE.
pub const KEY_APOSTROPHE: u8 = 0x34;
/// `,` / `;` on DE.
pub const KEY_COMMA: u8 = 0x36;
/// `.` / `:` on DE.
pub const KEY_PERIOD: u8 = 0x37;
/// US `/` position: `-` / `_` on DE.
pub const KEY_SLASH: u8 = 0x38;

/// The extra key left of `Z` on ISO keyboards (`<` `>` `|` on DE).
pub const KEY_NON_US_BACKSLASH: u8 = 0x64;

/// Highest usage declared in the report map's key array.
#[cfg(test)]
pub const KEY_MAX: u8 = 0x65;

/// Modifier bitfield (byte 0 of the keyboard report).
pub mod modifier {
    /// No modifier held.
    pub const NONE: u8 = 0x00;
    /// Left Control.
    pub const LEFT_CTRL: u8 = 0x01;
    /// Left Shift.
    pub const LEFT_SHIFT: u8 = 0x02;
    /// Left Alt.
    pub const LEFT_ALT: u8 = 0x04;
    /// Left GUI (Windows / Command).
    pub const LEFT_GUI: u8 = 0x08;
    /// Right Control.
    pub const RIGHT_CTRL: u8 = 0x10;
    /// Right Shift.
    pub const RIGHT_SHIFT: u8 = 0x20;
    /// AltGr on European layouts.
    pub const RIGHT_ALT: u8 = 0x40;
    /// Right GUI.
    pub const RIGHT_GUI: u8 = 0x80;
}
