//! Keyboard link state machine - connection, protocol mode, subscriptions,
//! and report routing.
//!
//! The BLE stack reports connection and GATT events asynchronously
//! (`on_*` methods) while the typing task emits reports. All link state
//! lives in one atomic byte, so every event is a single read-modify-write
//! and every emission routes on one consistent snapshot:
//!
//! ```text
//! bit 0  connected
//! bit 1  protocol mode (0 = Boot, 1 = Report)
//! bit 2  host subscribed to Boot Keyboard Input
//! bit 3  host subscribed to Input Report
//! ```
//!
//! ## Routing
//!
//! 1. Disconnected → nothing is sent.
//! 2. The protocol mode picks the preferred channel.
//! 3. Preferred channel subscribed → one notification on it.
//! 4. Otherwise → the report goes out on both channels, so a host that has
//!    not finished enabling notifications still receives input.
//!
//! The warm-up sequence after connecting ignores the protocol mode and is
//! broadcast on every subscribed channel (both when none is subscribed).
//!
//! Failed notifications are not retried.

use core::sync::atomic::{AtomicU8, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::delay::DelayNs;

use crate::config::{CONNECT_SETTLE_MS, KEY_PRESS_MS, KEY_RELEASE_MS, WARM_UP_SEQUENCE};
use crate::error::Error;
use crate::hid::keyboard::{KeyboardReport, KEYBOARD_REPORT_SIZE};
use crate::hid::layout::KeyStroke;
use crate::hid::report_protocol::{cccd_notify_enabled, ProtocolMode, ReportChannel};

/// The radio side of the link.
pub trait HidTransport {
    /// Push one keyboard report to the host on `channel`.
    fn notify(
        &self,
        channel: ReportChannel,
        report: &[u8; KEYBOARD_REPORT_SIZE],
    ) -> Result<(), Error>;

    /// Ask the stack to become discoverable again.
    fn start_advertising(&self);
}

const CONNECTED: u8 = 1 << 0;
const MODE_REPORT: u8 = 1 << 1;
const SUB_BOOT: u8 = 1 << 2;
const SUB_REPORT: u8 = 1 << 3;

const fn subscription_bit(channel: ReportChannel) -> u8 {
    match channel {
        ReportChannel::Boot => SUB_BOOT,
        ReportChannel::Report => SUB_REPORT,
    }
}

/// Snapshot of the link state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkState(u8);

impl LinkState {
    pub const fn is_connected(self) -> bool {
        self.0 & CONNECTED != 0
    }

    pub const fn protocol_mode(self) -> ProtocolMode {
        if self.0 & MODE_REPORT != 0 {
            ProtocolMode::Report
        } else {
            ProtocolMode::Boot
        }
    }

    pub const fn is_subscribed(self, channel: ReportChannel) -> bool {
        self.0 & subscription_bit(channel) != 0
    }
}

/// What happened to one report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Delivery {
    /// No central connected; nothing was sent.
    Suppressed,
    /// Sent once on the subscribed, preferred channel.
    Direct {
        channel: ReportChannel,
        result: Result<(), Error>,
    },
    /// Preferred channel not subscribed; sent on both channels.
    Fallback {
        boot: Result<(), Error>,
        report: Result<(), Error>,
    },
    /// Warm-up broadcast; `None` for a channel that was skipped.
    Broadcast {
        boot: Option<Result<(), Error>>,
        report: Option<Result<(), Error>>,
    },
}

impl Delivery {
    /// `true` if at least one notification was accepted by the transport.
    pub fn reached_host(&self) -> bool {
        match self {
            Delivery::Suppressed => false,
            Delivery::Direct { result, .. } => result.is_ok(),
            Delivery::Fallback { boot, report } => boot.is_ok() || report.is_ok(),
            Delivery::Broadcast { boot, report } => {
                matches!(boot, Some(Ok(()))) || matches!(report, Some(Ok(())))
            }
        }
    }
}

/// Result of a key-down / key-up pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tap {
    pub press: Delivery,
    pub release: Delivery,
}

impl Tap {
    const SUPPRESSED: Tap = Tap {
        press: Delivery::Suppressed,
        release: Delivery::Suppressed,
    };
}

/// HID keyboard link to one host.
pub struct KeyboardLink<T> {
    transport: T,
    state: AtomicU8,
    /// Held for a whole press/release pair so taps never interleave.
    typing: Mutex<CriticalSectionRawMutex, ()>,
}

impl<T> KeyboardLink<T> {
    /// Disconnected link in Boot Protocol with no subscriptions.
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            state: AtomicU8::new(0),
            typing: Mutex::new(()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn state(&self) -> LinkState {
        LinkState(self.state.load(Ordering::Acquire))
    }

    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    pub fn protocol_mode(&self) -> ProtocolMode {
        self.state().protocol_mode()
    }

    pub fn is_subscribed(&self, channel: ReportChannel) -> bool {
        self.state().is_subscribed(channel)
    }
}

impl<T: HidTransport> KeyboardLink<T> {
    // ═══════════════════════════════════════════════════════════════════════
    // Transport events
    // ═══════════════════════════════════════════════════════════════════════

    /// A central connected.
    pub fn on_connected(&self) {
        self.state.fetch_or(CONNECTED, Ordering::AcqRel);
        #[cfg(feature = "defmt")]
        defmt::info!("[BLE] connected, protocol mode {}", self.protocol_mode());
    }

    /// The central went away. Subscriptions are dropped, the protocol mode
    /// is kept, and advertising is restarted.
    pub fn on_disconnected(&self) {
        self.state
            .fetch_and(!(CONNECTED | SUB_BOOT | SUB_REPORT), Ordering::AcqRel);
        #[cfg(feature = "defmt")]
        defmt::info!("[BLE] disconnected - advertising again");
        self.transport.start_advertising();
    }

    /// Host wrote the Protocol Mode characteristic. Returns the new mode,
    /// or `None` if the write was not a valid mode and was ignored.
    pub fn on_protocol_mode_write(&self, data: &[u8]) -> Option<ProtocolMode> {
        let mode = ProtocolMode::parse_write(data)?;
        match mode {
            ProtocolMode::Boot => self.state.fetch_and(!MODE_REPORT, Ordering::AcqRel),
            ProtocolMode::Report => self.state.fetch_or(MODE_REPORT, Ordering::AcqRel),
        };
        #[cfg(feature = "defmt")]
        defmt::info!("[HID] host set protocol mode = {}", mode);
        Some(mode)
    }

    /// Host enabled or disabled notifications on `channel`.
    pub fn on_subscription_changed(&self, channel: ReportChannel, notify_enabled: bool) {
        let bit = subscription_bit(channel);
        if notify_enabled {
            self.state.fetch_or(bit, Ordering::AcqRel);
        } else {
            self.state.fetch_and(!bit, Ordering::AcqRel);
        }
        #[cfg(feature = "defmt")]
        defmt::info!("[HID] {} input subscribe = {}", channel.tag(), notify_enabled);
    }

    /// Host wrote the CCCD of `channel`. Malformed values are ignored.
    pub fn on_cccd_write(&self, channel: ReportChannel, data: &[u8]) {
        if let Some(enabled) = cccd_notify_enabled(data) {
            self.on_subscription_changed(channel, enabled);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Report emission
    // ═══════════════════════════════════════════════════════════════════════

    /// Send one report with `modifier` held and up to six `keycodes` down.
    pub fn emit(&self, modifier: u8, keycodes: &[u8]) -> Delivery {
        self.send_report(&KeyboardReport::chord(modifier, keycodes))
    }

    /// Route one report according to the current link state.
    pub fn send_report(&self, report: &KeyboardReport) -> Delivery {
        let state = self.state();
        if !state.is_connected() {
            return Delivery::Suppressed;
        }

        let bytes = report.to_bytes();
        let preferred = state.protocol_mode().preferred_channel();
        if state.is_subscribed(preferred) {
            let result = self.notify(preferred, &bytes, false);
            return Delivery::Direct {
                channel: preferred,
                result,
            };
        }

        Delivery::Fallback {
            boot: self.notify(ReportChannel::Boot, &bytes, true),
            report: self.notify(ReportChannel::Report, &bytes, true),
        }
    }

    /// Send one report on every subscribed channel, or on both channels
    /// when the host has not subscribed to either. The protocol mode is not
    /// consulted.
    pub fn broadcast_report(&self, report: &KeyboardReport) -> Delivery {
        let state = self.state();
        if !state.is_connected() {
            return Delivery::Suppressed;
        }

        let bytes = report.to_bytes();
        let unsubscribed = !state.is_subscribed(ReportChannel::Boot)
            && !state.is_subscribed(ReportChannel::Report);
        let send = |channel: ReportChannel| {
            (unsubscribed || state.is_subscribed(channel))
                .then(|| self.notify(channel, &bytes, unsubscribed))
        };

        Delivery::Broadcast {
            boot: send(ReportChannel::Boot),
            report: send(ReportChannel::Report),
        }
    }

    /// Press `stroke`, hold it, release all keys, then pause.
    ///
    /// Nothing is sent (and no time is spent) while disconnected.
    pub async fn tap<D: DelayNs>(&self, stroke: KeyStroke, delay: &mut D) -> Tap {
        self.tap_with(stroke, delay, Self::send_report).await
    }

    async fn tap_with<D: DelayNs>(
        &self,
        stroke: KeyStroke,
        delay: &mut D,
        send: fn(&Self, &KeyboardReport) -> Delivery,
    ) -> Tap {
        let _typing = self.typing.lock().await;

        if !self.is_connected() {
            return Tap::SUPPRESSED;
        }

        let press = send(self, &KeyboardReport::press(stroke));
        delay.delay_ms(KEY_PRESS_MS).await;
        let release = send(self, &KeyboardReport::empty());
        delay.delay_ms(KEY_RELEASE_MS).await;

        Tap { press, release }
    }

    /// Wait for the host to settle after connecting, then tap the warm-up
    /// sequence on every subscribed channel (see [`Self::broadcast_report`]).
    /// Best effort: failures are only logged.
    ///
    /// Returns the number of warm-up taps that reached the host.
    pub async fn warm_up<D: DelayNs>(&self, delay: &mut D) -> usize {
        delay.delay_ms(CONNECT_SETTLE_MS).await;

        let mut delivered = 0;
        for &stroke in WARM_UP_SEQUENCE {
            let tap = self.tap_with(stroke, delay, Self::broadcast_report).await;
            if tap.press.reached_host() {
                delivered += 1;
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "[HID] warm-up {}/{} taps delivered, protocol mode {}",
            delivered,
            WARM_UP_SEQUENCE.len(),
            self.protocol_mode()
        );
        delivered
    }

    #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
    fn notify(
        &self,
        channel: ReportChannel,
        bytes: &[u8; KEYBOARD_REPORT_SIZE],
        fallback: bool,
    ) -> Result<(), Error> {
        let result = self.transport.notify(channel, bytes);

        #[cfg(feature = "defmt")]
        {
            let star = if fallback { "*" } else { "" };
            match result {
                Ok(()) => defmt::debug!(
                    "[HID] send {}{} mods={=u8:#x} keys={=[u8]:#x}",
                    channel.tag(),
                    star,
                    bytes[0],
                    &bytes[2..]
                ),
                Err(e) => defmt::warn!(
                    "[HID] send {}{} failed: {} mods={=u8:#x} keys={=[u8]:#x}",
                    channel.tag(),
                    star,
                    e,
                    bytes[0],
                    &bytes[2..]
                ),
            }
        }

        result
    }
}
