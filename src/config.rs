//! Application-wide constants and compile-time configuration.
//!
//! All radio identity, timing parameters, and serial settings live here
//! so they can be tuned in one place.

use crate::hid::keycodes::{modifier, KEY_A, KEY_ENTER};
use crate::hid::layout::KeyStroke;

// BLE

/// Complete local name advertised to hosts.
pub const BLE_DEVICE_NAME: &str = "nRF52 DE Keyboard";

/// Manufacturer string exposed by the Device Information service.
pub const BLE_MANUFACTURER: &str = "uart2ble";

/// GAP appearance value for a generic keyboard.
pub const BLE_APPEARANCE_KEYBOARD: u16 = 961;

/// Advertising interval (in 0.625 ms units). 160 = 100 ms.
pub const BLE_ADV_INTERVAL: u32 = 160;

/// Delay before retrying advertising after an advertising error (ms).
pub const BLE_ADV_RETRY_MS: u64 = 200;

/// HID Information characteristic value:
/// bcdHID 1.11, country code 0, flags = normally connectable.
pub const HID_INFORMATION: [u8; 4] = [0x11, 0x01, 0x00, 0x02];

// Typing

/// Time the host is given after connecting before the warm-up sequence (ms).
///
/// Hosts usually enable notifications during this window.
pub const CONNECT_SETTLE_MS: u32 = 800;

/// Hold time between the key-down report and the release report (ms).
pub const KEY_PRESS_MS: u32 = 8;

/// Gap after the release report before the next character (ms).
pub const KEY_RELEASE_MS: u32 = 5;

/// Keys tapped after connecting to prime the host's input pipeline.
pub const WARM_UP_SEQUENCE: &[KeyStroke] = &[
    KeyStroke::new(modifier::LEFT_SHIFT, KEY_A),
    KeyStroke::new(modifier::NONE, KEY_ENTER),
];

// UART
//
// Pins are picked in `main.rs`: RX on P0.08, TX on P0.06.

/// Serial line baud rate.
pub const UART_BAUD: u32 = 115_200;

/// Most bytes handed to the typist per read.
pub const UART_CHUNK: usize = 32;

/// RX ring buffer size. Typing runs at roughly 75 characters per second,
/// so this bounds how much pasted text can be queued.
pub const UART_RX_BUFFER: usize = 1024;

/// TX ring buffer size. Nothing is sent back on the serial line.
pub const UART_TX_BUFFER: usize = 16;
