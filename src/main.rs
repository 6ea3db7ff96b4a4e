//! uart2ble - UART to BLE HID keyboard firmware (nRF52840).
//!
//! UTF-8 text arriving on the serial line is typed on the connected host
//! as a German-layout Bluetooth keyboard.
//!
//! Task layout:
//!
//! ```text
//!  UARTE0 ──DMA──► RX ring buffer ──► typing_task ──┐
//!                                                   ▼
//!  SoftDevice ◄── softdevice_task   ble_task ──► KeyboardLink ──► notify
//! ```

#![no_std]
#![no_main]

mod ble;
mod uart;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::buffered_uarte::{self, BufferedUarte};
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::{bind_interrupts, peripherals};
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use uart2ble::config::{BLE_APPEARANCE_KEYBOARD, UART_RX_BUFFER, UART_TX_BUFFER};
use uart2ble::link::HidTransport;

use crate::ble::hid_server::Server;
use crate::ble::{BleTransport, Link};
use crate::uart::SerialRx;

bind_interrupts!(struct Irqs {
    UARTE0_UART0 => buffered_uarte::InterruptHandler<peripherals::UARTE0>;
});

static LINK: StaticCell<Link> = StaticCell::new();
static SERVER: StaticCell<Server> = StaticCell::new();
static UART_RX_BUF: StaticCell<[u8; UART_RX_BUFFER]> = StaticCell::new();
static UART_TX_BUF: StaticCell<[u8; UART_TX_BUFFER]> = StaticCell::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn ble_task(sd: &'static Softdevice, server: &'static Server, link: &'static Link) -> ! {
    ble::run(sd, server, link).await
}

#[embassy_executor::task]
async fn typing_task(rx: SerialRx, link: &'static Link) -> ! {
    uart::type_incoming(rx, link).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("uart2ble starting");

    // Priorities 0, 1 and 4 are reserved by the SoftDevice.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.gpiote_interrupt_priority = Priority::P2;
    nrf_config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(nrf_config);
    interrupt::UARTE0_UART0.set_priority(Priority::P3);

    // BLE
    let sd = Softdevice::enable(&ble::softdevice_config());
    let appearance = unsafe { raw::sd_ble_gap_appearance_set(BLE_APPEARANCE_KEYBOARD) };
    if appearance != raw::NRF_SUCCESS {
        defmt::warn!("[BLE] failed to set appearance: {}", appearance);
    }

    let (hid, dis) = unwrap!(ble::register_services(sd));
    let sd: &'static Softdevice = sd;

    let link: &'static Link = LINK.init(Link::new(BleTransport::new(hid.report_handles())));
    let server: &'static Server = SERVER.init(Server::new(sd, dis, hid, link));

    unwrap!(spawner.spawn(softdevice_task(sd)));

    // UART: RX on P0.08, TX on P0.06 (DK virtual COM port).
    // TIMER0 and PPI channels 17..=31 belong to the SoftDevice.
    let uart = BufferedUarte::new(
        p.UARTE0,
        p.TIMER1,
        p.PPI_CH0,
        p.PPI_CH1,
        p.PPI_GROUP0,
        Irqs,
        p.P0_08,
        p.P0_06,
        uart::config(),
        UART_RX_BUF.init([0; UART_RX_BUFFER]),
        UART_TX_BUF.init([0; UART_TX_BUFFER]),
    );
    let (rx, _tx) = uart.split();

    unwrap!(spawner.spawn(typing_task(rx, link)));
    unwrap!(spawner.spawn(ble_task(sd, server, link)));

    link.transport().start_advertising();
    info!("uart2ble ready");
}
