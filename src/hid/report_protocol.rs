//! HID-over-GATT protocol modes and input report channels.
//!
//! A HOGP keyboard exposes two notification paths for the same 8-byte
//! keyboard report:
//!
//! - **Boot Keyboard Input** (UUID 0x2A22) - fixed format, used by minimal
//!   hosts (BIOS/UEFI) after they switch the device to Boot Protocol.
//! - **Input Report** (UUID 0x2A4D) - described by the Report Map, used in
//!   Report Protocol.
//!
//! The host selects the active mode by writing the Protocol Mode
//! characteristic (UUID 0x2A4E) and subscribes to each channel by writing
//! its Client Characteristic Configuration Descriptor (CCCD).

/// Protocol Mode characteristic value for Boot Protocol.
pub const PROTOCOL_MODE_BOOT: u8 = 0x00;
/// Protocol Mode characteristic value for Report Protocol.
pub const PROTOCOL_MODE_REPORT: u8 = 0x01;

/// CCCD bit that enables notifications.
const CCCD_NOTIFY: u16 = 0x0001;

/// Active HID protocol mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolMode {
    /// Simplified fixed report format.
    #[default]
    Boot,
    /// Report-Map-described format.
    Report,
}

impl ProtocolMode {
    /// Decode a Protocol Mode characteristic value.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            PROTOCOL_MODE_BOOT => Some(ProtocolMode::Boot),
            PROTOCOL_MODE_REPORT => Some(ProtocolMode::Report),
            _ => None,
        }
    }

    /// Protocol Mode characteristic value.
    pub const fn code(self) -> u8 {
        match self {
            ProtocolMode::Boot => PROTOCOL_MODE_BOOT,
            ProtocolMode::Report => PROTOCOL_MODE_REPORT,
        }
    }

    /// Channel the host expects input on in this mode.
    pub const fn preferred_channel(self) -> ReportChannel {
        match self {
            ProtocolMode::Boot => ReportChannel::Boot,
            ProtocolMode::Report => ReportChannel::Report,
        }
    }

    /// Parse a raw write to the Protocol Mode characteristic.
    ///
    /// Only a single byte holding a known mode code is accepted.
    pub fn parse_write(data: &[u8]) -> Option<Self> {
        match data {
            [code] => Self::from_code(*code),
            _ => None,
        }
    }
}

/// Notification channel carrying keyboard input reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportChannel {
    /// Boot Keyboard Input characteristic.
    Boot,
    /// Input Report characteristic.
    Report,
}

impl ReportChannel {
    /// Short tag for diagnostics.
    pub const fn tag(self) -> &'static str {
        match self {
            ReportChannel::Boot => "Boot",
            ReportChannel::Report => "Report",
        }
    }
}

/// Decode a CCCD write. Returns whether notifications are enabled, or
/// `None` when the value is not the expected 2-byte little-endian word.
pub fn cccd_notify_enabled(data: &[u8]) -> Option<bool> {
    match data {
        [lo, hi] => Some(u16::from_le_bytes([*lo, *hi]) & CCCD_NOTIFY != 0),
        _ => None,
    }
}
