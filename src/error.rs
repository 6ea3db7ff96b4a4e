//! Error types for uart2ble.
//!
//! Everything is `Copy` and fixed-size so errors can be logged with defmt
//! and stored in report outcomes without `alloc`.

use crate::hid::report_protocol::ReportChannel;

/// Failures on the typing path.
///
/// None of these stop the firmware: the failure is logged and typing
/// continues with the next character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Radio stack failure outside of report delivery.
    Ble(BleError),

    /// The host dropped the link before the report could be queued.
    Disconnected,

    /// The stack rejected a notification on this channel.
    NotifyFailed(ReportChannel),

    /// Serial reception error (framing, overrun, ...).
    Uart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// SoftDevice error code.
    Raw(u32),
    AdvertiseFailed,
    RegisterFailed,
}

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Self::Ble(e)
    }
}
