//! Serial text → key taps.
//!
//! Glues the UTF-8 decoder, the German layout and the keyboard link
//! together: every decoded character becomes one press/release pair.
//! Characters the layout does not cover are logged and skipped.

use embedded_hal_async::delay::DelayNs;

use crate::hid::layout::{translate, KeyStroke};
use crate::link::{HidTransport, KeyboardLink, Tap};
use crate::utf8::Utf8Decoder;

/// Outcome of feeding one byte or character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Typed {
    /// Mid-sequence, or the byte was discarded as malformed.
    Incomplete,
    /// The character has no key on the layout.
    Unmapped(u32),
    /// The character was tapped.
    Key { stroke: KeyStroke, tap: Tap },
}

/// Types a byte stream on a [`KeyboardLink`].
pub struct Typist<'a, T, D> {
    link: &'a KeyboardLink<T>,
    decoder: Utf8Decoder,
    delay: D,
}

impl<'a, T: HidTransport, D: DelayNs> Typist<'a, T, D> {
    pub fn new(link: &'a KeyboardLink<T>, delay: D) -> Self {
        Self {
            link,
            decoder: Utf8Decoder::new(),
            delay,
        }
    }

    pub fn link(&self) -> &'a KeyboardLink<T> {
        self.link
    }

    /// Feed one raw byte from the serial line.
    pub async fn feed_byte(&mut self, byte: u8) -> Typed {
        match self.decoder.feed(byte) {
            Some(cp) => self.type_code_point(cp).await,
            None => Typed::Incomplete,
        }
    }

    /// Type one already-decoded code point.
    pub async fn type_code_point(&mut self, cp: u32) -> Typed {
        let Some(stroke) = translate(cp) else {
            log_unmapped(cp);
            return Typed::Unmapped(cp);
        };
        let tap = self.link.tap(stroke, &mut self.delay).await;
        Typed::Key { stroke, tap }
    }

    /// Feed every byte of `bytes`. Returns how many characters were tapped.
    pub async fn feed(&mut self, bytes: &[u8]) -> usize {
        let mut tapped = 0;
        for &byte in bytes {
            if let Typed::Key { .. } = self.feed_byte(byte).await {
                tapped += 1;
            }
        }
        tapped
    }

    /// Type a whole string.
    pub async fn type_text(&mut self, text: &str) -> usize {
        self.feed(text.as_bytes()).await
    }
}

#[cfg(feature = "defmt")]
fn log_unmapped(cp: u32) {
    match u8::try_from(cp) {
        Ok(ascii) if ascii.is_ascii() => {
            defmt::warn!("[KEY] unmapped ASCII {=u8:#x} '{=char}'", ascii, ascii as char)
        }
        _ => defmt::warn!("[KEY] unmapped U+{=u32:X}", cp),
    }
}

#[cfg(not(feature = "defmt"))]
fn log_unmapped(_cp: u32) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hid::keycodes::modifier::{LEFT_SHIFT, NONE};
    use crate::hid::keycodes::{KEY_1, KEY_A, KEY_MINUS};
    use crate::hid::report_protocol::ReportChannel;
    use crate::config::WARM_UP_SEQUENCE;
    use crate::test_support::{block_on, MockDelay, RecordingTransport, YieldingDelay};
    use embassy_futures::join::join;

    fn report_mode_link() -> KeyboardLink<RecordingTransport> {
        let link = KeyboardLink::new(RecordingTransport::default());
        link.on_connected();
        link.on_protocol_mode_write(&[0x01]);
        link.on_subscription_changed(ReportChannel::Report, true);
        link
    }

    #[test]
    fn types_mixed_text_as_down_up_pairs() {
        let link = report_mode_link();
        let mut typist = Typist::new(&link, MockDelay::default());

        // "Aß!"
        let tapped = block_on(typist.feed(&[0x41, 0xC3, 0x9F, 0x21]));

        assert_eq!(tapped, 3);
        let sent = link.transport().sent();
        assert_eq!(sent.len(), 6);
        assert!(sent.iter().all(|(ch, _)| *ch == ReportChannel::Report));
        assert_eq!(sent[0].1, [LEFT_SHIFT, 0, KEY_A, 0, 0, 0, 0, 0]);
        assert_eq!(sent[2].1, [NONE, 0, KEY_MINUS, 0, 0, 0, 0, 0]);
        assert_eq!(sent[4].1, [LEFT_SHIFT, 0, KEY_1, 0, 0, 0, 0, 0]);
        for release in sent.iter().skip(1).step_by(2) {
            assert_eq!(release.1, [0; 8]);
        }
    }

    #[test]
    fn partial_sequence_is_incomplete() {
        let link = report_mode_link();
        let mut typist = Typist::new(&link, MockDelay::default());

        assert_eq!(block_on(typist.feed_byte(0xE2)), Typed::Incomplete);
        assert_eq!(block_on(typist.feed_byte(0x82)), Typed::Incomplete);
        assert!(link.transport().sent().is_empty());
        assert!(matches!(block_on(typist.feed_byte(0xAC)), Typed::Key { .. }));
    }

    #[test]
    fn unmapped_characters_are_skipped() {
        let link = report_mode_link();
        let mut typist = Typist::new(&link, MockDelay::default());

        assert_eq!(block_on(typist.feed_byte(b'@')), Typed::Unmapped(0x40));
        assert_eq!(block_on(typist.type_text("é")), 0);
        assert!(link.transport().sent().is_empty());
    }

    #[test]
    fn disconnected_typing_sends_nothing() {
        let link = KeyboardLink::new(RecordingTransport::default());
        let mut typist = Typist::new(&link, MockDelay::default());

        let typed = block_on(typist.feed_byte(b'a'));

        assert!(matches!(
            typed,
            Typed::Key { tap, .. } if !tap.press.reached_host()
        ));
        assert!(link.transport().sent().is_empty());
    }

    #[test]
    fn type_text_counts_taps() {
        let link = report_mode_link();
        let mut typist = Typist::new(&link, MockDelay::default());

        assert_eq!(block_on(typist.type_text("Grüße, Welt!\n")), 13);
        assert_eq!(link.transport().sent().len(), 26);
    }

    #[test]
    fn warm_up_and_typing_never_interleave() {
        let link = KeyboardLink::new(RecordingTransport::default());
        link.on_connected();
        link.on_subscription_changed(ReportChannel::Boot, true);
        let mut typist = Typist::new(&link, YieldingDelay::default());
        let mut warm_up_delay = YieldingDelay::default();

        let (delivered, tapped) =
            block_on(join(link.warm_up(&mut warm_up_delay), typist.type_text("ab")));

        assert_eq!(delivered, WARM_UP_SEQUENCE.len());
        assert_eq!(tapped, 2);
        let sent = link.transport().sent();
        assert_eq!(sent.len(), 2 * (WARM_UP_SEQUENCE.len() + 2));
        for pair in sent.chunks(2) {
            assert_ne!(pair[0].1, [0; 8], "expected a key-down, got {pair:?}");
            assert_eq!(pair[1].1, [0; 8], "key-down not followed by release: {pair:?}");
        }
    }
}
