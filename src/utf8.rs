//! Incremental UTF-8 decoder for the serial input stream.
//!
//! Bytes arrive one at a time from the UART, so the decoder keeps just
//! enough state to finish the current sequence:
//!
//! ```text
//! 0xxxxxxx                             → 1 byte,  complete immediately
//! 110xxxxx 10xxxxxx                    → 2 bytes, 1 continuation
//! 1110xxxx 10xxxxxx 10xxxxxx           → 3 bytes, 2 continuations
//! 11110xxx 10xxxxxx 10xxxxxx 10xxxxxx  → 4 bytes, 3 continuations
//! ```
//!
//! A byte that does not fit the expected pattern throws away the partial
//! sequence. The offending byte is consumed, never re-read as a new lead.
//! Only bit patterns are checked: overlong forms (`C1 81` → `A`) and
//! surrogates decode like any other value; results above U+10FFFF are dropped.

/// Highest valid Unicode scalar value.
pub const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// Byte-at-a-time UTF-8 decoder.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Utf8Decoder {
    /// Payload bits collected so far for the current sequence.
    accumulator: u32,
    /// Continuation bytes still expected (0..=3).
    remaining: u8,
}

impl Utf8Decoder {
    /// Create a decoder ready for the first byte of a sequence.
    pub const fn new() -> Self {
        Self {
            accumulator: 0,
            remaining: 0,
        }
    }

    /// Feed one byte. Returns the code point once its last byte arrives.
    pub fn feed(&mut self, byte: u8) -> Option<u32> {
        if self.remaining == 0 {
            return self.start(byte);
        }

        if byte & 0xC0 != 0x80 {
            self.reset();
            return None;
        }

        self.accumulator = (self.accumulator << 6) | u32::from(byte & 0x3F);
        self.remaining -= 1;
        if self.remaining > 0 {
            return None;
        }

        let code_point = self.accumulator;
        self.reset();
        (code_point <= MAX_CODE_POINT).then_some(code_point)
    }

    /// `true` while a multi-byte sequence is partially consumed.
    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.remaining != 0
    }

    /// Drop any partial sequence.
    pub fn reset(&mut self) {
        self.accumulator = 0;
        self.remaining = 0;
    }

    fn start(&mut self, byte: u8) -> Option<u32> {
        let (payload, continuations) = match byte {
            0x00..=0x7F => return Some(u32::from(byte)),
            b if b & 0xE0 == 0xC0 => (b & 0x1F, 1),
            b if b & 0xF0 == 0xE0 => (b & 0x0F, 2),
            b if b & 0xF8 == 0xF0 => (b & 0x07, 3),
            // Stray continuation byte or 0xF8..=0xFF.
            _ => {
                self.reset();
                return None;
            }
        };
        self.accumulator = u32::from(payload);
        self.remaining = continuations;
        None
    }
}
