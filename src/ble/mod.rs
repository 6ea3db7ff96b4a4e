//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Advertiser** - makes the board discoverable as a keyboard and
//!    waits for a central to connect.
//! 2. **HID Server** - the GATT attribute table; host writes (protocol mode,
//!    CCCDs) are fed into the [`KeyboardLink`] state machine.
//! 3. **Transport** - pushes keyboard reports to the connected host as
//!    notifications on behalf of the link.
//!
//! Only one central is served at a time. After a disconnect the link asks
//! for advertising again through [`HidTransport::start_advertising`].

pub mod advertise;
pub mod hid_server;

use core::cell::RefCell;
use core::mem;

use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Timer};
use nrf_softdevice::ble::gatt_server::{self, NotifyValueError};
use nrf_softdevice::ble::Connection;
use nrf_softdevice::{raw, Config, Softdevice};

use uart2ble::config::{BLE_ADV_RETRY_MS, BLE_DEVICE_NAME};
use uart2ble::error::{BleError, Error};
use uart2ble::hid::keyboard::KEYBOARD_REPORT_SIZE;
use uart2ble::hid::ReportChannel;
use uart2ble::link::{HidTransport, KeyboardLink};

use self::hid_server::{DeviceInformationService, HidService, ReportHandles, Server};

/// The keyboard link as wired to the SoftDevice.
pub type Link = KeyboardLink<BleTransport>;

/// SoftDevice configuration for a single-connection peripheral.
pub fn softdevice_config() -> Config {
    Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 128 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: 1024,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: BLE_DEVICE_NAME.as_ptr() as _,
            current_len: BLE_DEVICE_NAME.len() as u16,
            max_len: BLE_DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        conn_gatts: Some(raw::ble_gatts_conn_cfg_t {
            hvn_tx_queue_size: 4,
        }),
        ..Default::default()
    }
}

/// Register the GATT services. Must run before the SoftDevice task starts.
pub fn register_services(
    sd: &mut Softdevice,
) -> Result<(HidService, DeviceInformationService), Error> {
    let hid = HidService::new(sd).map_err(|e| {
        warn!("[BLE] HID service registration failed: {}", e);
        BleError::RegisterFailed
    })?;
    let dis = DeviceInformationService::new(sd).map_err(|e| {
        warn!("[BLE] DIS registration failed: {}", e);
        BleError::RegisterFailed
    })?;
    Ok((hid, dis))
}

/// Notification transport backed by the current SoftDevice connection.
pub struct BleTransport {
    handles: ReportHandles,
    conn: Mutex<CriticalSectionRawMutex, RefCell<Option<Connection>>>,
    advertise: Signal<CriticalSectionRawMutex, ()>,
}

impl BleTransport {
    pub fn new(handles: ReportHandles) -> Self {
        Self {
            handles,
            conn: Mutex::new(RefCell::new(None)),
            advertise: Signal::new(),
        }
    }

    fn attach(&self, conn: &Connection) {
        self.conn.lock(|c| *c.borrow_mut() = Some(conn.clone()));
    }

    fn detach(&self) {
        self.conn.lock(|c| c.borrow_mut().take());
    }

    async fn advertise_requested(&self) {
        self.advertise.wait().await
    }
}

impl HidTransport for BleTransport {
    fn notify(
        &self,
        channel: ReportChannel,
        report: &[u8; KEYBOARD_REPORT_SIZE],
    ) -> Result<(), Error> {
        let handle = self.handles.handle(channel);
        self.conn.lock(|c| match c.borrow().as_ref() {
            Some(conn) => gatt_server::notify_value(conn, handle, report).map_err(|e| match e {
                NotifyValueError::Disconnected => Error::Disconnected,
                NotifyValueError::Raw(raw) => {
                    warn!("[BLE] notify raw error: {}", raw);
                    Error::NotifyFailed(channel)
                }
            }),
            None => Err(Error::Disconnected),
        })
    }

    fn start_advertising(&self) {
        self.advertise.signal(());
    }
}

/// Advertise, serve one connection, repeat.
///
/// The first advertising round must be requested through
/// [`HidTransport::start_advertising`].
pub async fn run(sd: &'static Softdevice, server: &'static Server, link: &'static Link) -> ! {
    loop {
        link.transport().advertise_requested().await;

        let conn = match advertise::advertise(sd).await {
            Ok(conn) => conn,
            Err(_) => {
                Timer::after_millis(BLE_ADV_RETRY_MS).await;
                link.transport().start_advertising();
                continue;
            }
        };

        link.transport().attach(&conn);
        link.on_connected();

        let warm_up = async {
            link.warm_up(&mut Delay).await;
            core::future::pending::<()>().await
        };

        if let Either::First(_) = select(gatt_server::run(&conn, server, |_| {}), warm_up).await {
            info!("[BLE] connection closed");
        }

        link.transport().detach();
        link.on_disconnected();
    }
}
