//! Serial input path.
//!
//! UARTE0 runs as a `BufferedUarte`: a timer and two PPI channels keep RX
//! DMA running into a ring buffer, and the typing task drains it in chunks.
//! Input is only lost when the ring buffer fills while typing is behind.

use defmt::{debug, warn};
use embassy_nrf::buffered_uarte::BufferedUarteRx;
use embassy_nrf::peripherals::{TIMER1, UARTE0};
use embassy_nrf::uarte::{self, Baudrate};
use embassy_time::Delay;

use uart2ble::config::{UART_BAUD, UART_CHUNK};
use uart2ble::error::Error;
use uart2ble::typist::Typist;

use crate::ble::Link;

/// Receive half of the serial line.
pub type SerialRx = BufferedUarteRx<'static, UARTE0, TIMER1>;

/// UARTE configuration for the serial line (8N1).
pub fn config() -> uarte::Config {
    let mut config = uarte::Config::default();
    config.parity = uarte::Parity::EXCLUDED;
    config.baudrate = baudrate(UART_BAUD);
    config
}

fn baudrate(baud: u32) -> Baudrate {
    match baud {
        9_600 => Baudrate::BAUD9600,
        19_200 => Baudrate::BAUD19200,
        38_400 => Baudrate::BAUD38400,
        57_600 => Baudrate::BAUD57600,
        115_200 => Baudrate::BAUD115200,
        230_400 => Baudrate::BAUD230400,
        460_800 => Baudrate::BAUD460800,
        921_600 => Baudrate::BAUD921600,
        1_000_000 => Baudrate::BAUD1M,
        other => {
            warn!("[UART] unsupported baud rate {}, using 115200", other);
            Baudrate::BAUD115200
        }
    }
}

/// Type everything that arrives on the serial line. Never returns.
///
/// Reception runs on EasyDMA into the ring buffer, so bytes keep arriving
/// while a character is being tapped.
pub async fn type_incoming(mut rx: SerialRx, link: &'static Link) -> ! {
    let mut typist = Typist::new(link, Delay);
    let mut buf = [0u8; UART_CHUNK];
    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(_) => {
                warn!("[UART] read failed: {}", Error::Uart);
                continue;
            }
        };
        let tapped = typist.feed(&buf[..n]).await;
        debug!("[UART] {} bytes in, {} keys tapped", n, tapped);
    }
}
