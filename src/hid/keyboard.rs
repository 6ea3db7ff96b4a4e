//! The 8-byte keyboard input report.
//!
//! Boot Keyboard Input and the Report-protocol Input Report carry the
//! same bytes (the Report ID is implied by the characteristic):
//!
//! ```text
//! [0]    modifiers  LCtrl LShift LAlt LGui RCtrl RShift RAlt RGui (bit 0..7)
//! [1]    0x00
//! [2..8] key usages, unused slots 0x00
//! ```

use super::layout::KeyStroke;

/// Size of a keyboard input report on the wire (modifier + reserved + 6 keys).
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Report ID of the keyboard input report in [`KEYBOARD_REPORT_MAP`].
pub const KEYBOARD_REPORT_ID: u8 = 0x01;

/// Keyboard input report, shared by Boot and Report protocol.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier bitfield (Ctrl, Shift, Alt, GUI for left and right).
    pub modifier: u8,
    /// Reserved byte, always 0.
    pub reserved: u8,
    /// Up to 6 simultaneous key usage codes, zero-padded.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// All keys up.
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; 6],
        }
    }

    /// Key-down report for a single translated key stroke.
    pub const fn press(stroke: KeyStroke) -> Self {
        Self {
            modifier: stroke.modifier,
            reserved: 0,
            keycodes: [stroke.keycode, 0, 0, 0, 0, 0],
        }
    }

    /// Key-down report for a chord of up to six keys.
    ///
    /// Keys past the sixth are dropped; unused slots stay zero.
    pub fn chord(modifier: u8, keys: &[u8]) -> Self {
        let mut report = Self {
            modifier,
            ..Self::empty()
        };
        for (slot, &key) in report.keycodes.iter_mut().zip(keys) {
            *slot = key;
        }
        report
    }

    /// Write the wire form into `buf`. Returns 8, or 0 if `buf` is short.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..8].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }

    /// Wire form of the report.
    pub fn to_bytes(&self) -> [u8; KEYBOARD_REPORT_SIZE] {
        let mut buf = [0u8; KEYBOARD_REPORT_SIZE];
        self.serialize(&mut buf);
        buf
    }

    /// `true` for a release report.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}

/// Report Map: one keyboard input report (ID 1) with an LED output report.
pub const KEYBOARD_REPORT_MAP: &[u8] = &[
    0x05, 0x01, 0x09, 0x06, 0xA1, 0x01, // Generic Desktop / Keyboard / Application
    0x85, KEYBOARD_REPORT_ID,
    // modifiers: 8 x 1 bit, usages 0xE0..=0xE7
    0x05, 0x07, 0x19, 0xE0, 0x29, 0xE7, 0x15, 0x00, 0x25, 0x01,
    0x75, 0x01, 0x95, 0x08, 0x81, 0x02,
    // reserved byte
    0x75, 0x08, 0x95, 0x01, 0x81, 0x01,
    // LEDs: 5 x 1 bit out, 3 bits padding
    0x05, 0x08, 0x19, 0x01, 0x29, 0x05, 0x75, 0x01, 0x95, 0x05, 0x91, 0x02,
    0x75, 0x03, 0x95, 0x01, 0x91, 0x01,
    // keys: 6 x 8 bit array, usages 0..=101
    0x05, 0x07, 0x19, 0x00, 0x29, 0x65, 0x15, 0x00, 0x25, 0x65,
    0x75, 0x08, 0x95, 0x06, 0x81, 0x00,
    0xC0,
];
