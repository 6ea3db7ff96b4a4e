//! Core library for uart2ble.
//!
//! Holds the pieces of the firmware that do not touch hardware, so they
//! can be tested on the host:
//!
//! - [`utf8`] - byte-at-a-time UTF-8 decoding of the serial stream
//! - [`hid`] - keyboard reports, keycodes and the German layout table
//! - [`link`] - connection / protocol mode / subscription state machine
//!   and report routing
//! - [`typist`] - decoder + layout + link, one tap per character
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and adds the SoftDevice and UART glue on top of this crate.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod hid;
pub mod link;
pub mod typist;
pub mod utf8;

#[cfg(test)]
mod test_support;

pub use error::{BleError, Error};
pub use link::{Delivery, HidTransport, KeyboardLink, LinkState, Tap};
pub use typist::{Typed, Typist};
pub use utf8::Utf8Decoder;
