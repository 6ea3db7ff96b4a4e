//! GATT server: HID-over-GATT keyboard service plus Device Information.
//!
//! Attribute table (HID service 0x1812):
//!
//! | UUID   | Characteristic        | Props              | Value                     |
//! |--------|-----------------------|--------------------|---------------------------|
//! | 0x2A4A | HID Information       | read               | `HID_INFORMATION`         |
//! | 0x2A4B | Report Map            | read               | `KEYBOARD_REPORT_MAP`     |
//! | 0x2A4C | HID Control Point     | write w/o resp     | suspend / exit suspend    |
//! | 0x2A4E | Protocol Mode         | read, write w/o r. | 0x00 Boot, 0x01 Report    |
//! | 0x2A4D | Input Report          | read, notify       | 8 bytes, Report Ref [1,1] |
//! | 0x2A22 | Boot Keyboard Input   | read, notify       | 8 bytes                   |
//! | 0x2A32 | Boot Keyboard Output  | read, write        | LED bitmap                |
//!
//! Writes are forwarded to the [`Link`] state machine; everything else is
//! served by the SoftDevice from the attribute table.

use defmt::{debug, info, warn, Format};
use nrf_softdevice::ble::gatt_server::builder::ServiceBuilder;
use nrf_softdevice::ble::gatt_server::characteristic::{Attribute, Metadata, Properties};
use nrf_softdevice::ble::gatt_server::{self, RegisterError, WriteOp};
use nrf_softdevice::ble::{Connection, Uuid};
use nrf_softdevice::Softdevice;

use uart2ble::config::{BLE_MANUFACTURER, HID_INFORMATION};
use uart2ble::hid::keyboard::{KEYBOARD_REPORT_ID, KEYBOARD_REPORT_MAP, KEYBOARD_REPORT_SIZE};
use uart2ble::hid::report_protocol::PROTOCOL_MODE_BOOT;
use uart2ble::hid::ReportChannel;

use super::Link;

const HID_SERVICE: Uuid = Uuid::new_16(0x1812);
const DEVICE_INFORMATION_SERVICE: Uuid = Uuid::new_16(0x180A);

const HID_INFO: Uuid = Uuid::new_16(0x2A4A);
const REPORT_MAP: Uuid = Uuid::new_16(0x2A4B);
const HID_CONTROL_POINT: Uuid = Uuid::new_16(0x2A4C);
const HID_REPORT: Uuid = Uuid::new_16(0x2A4D);
const PROTOCOL_MODE: Uuid = Uuid::new_16(0x2A4E);
const BOOT_KEYBOARD_INPUT: Uuid = Uuid::new_16(0x2A22);
const BOOT_KEYBOARD_OUTPUT: Uuid = Uuid::new_16(0x2A32);
const MANUFACTURER_NAME: Uuid = Uuid::new_16(0x2A29);

const REPORT_REFERENCE: Uuid = Uuid::new_16(0x2908);
/// Report Reference report type for an input report.
const REPORT_TYPE_INPUT: u8 = 0x01;

/// Value handles of the two notification channels.
#[derive(Clone, Copy, Debug, Format)]
pub struct ReportHandles {
    pub boot_input: u16,
    pub input_report: u16,
}

impl ReportHandles {
    pub fn handle(&self, channel: ReportChannel) -> u16 {
        match channel {
            ReportChannel::Boot => self.boot_input,
            ReportChannel::Report => self.input_report,
        }
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, Format)]
pub struct HidService {
    hid_info: u16,
    report_map: u16,
    control_point: u16,
    protocol_mode: u16,
    input_report: u16,
    input_report_cccd: u16,
    input_report_reference: u16,
    boot_input: u16,
    boot_input_cccd: u16,
    boot_output: u16,
}

impl HidService {
    pub fn new(sd: &mut Softdevice) -> Result<Self, RegisterError> {
        let mut sb = ServiceBuilder::new(sd, HID_SERVICE)?;

        let hid_info = sb
            .add_characteristic(
                HID_INFO,
                Attribute::new(HID_INFORMATION),
                Metadata::new(Properties::new().read()),
            )?
            .build();

        let report_map = sb
            .add_characteristic(
                REPORT_MAP,
                Attribute::new(KEYBOARD_REPORT_MAP),
                Metadata::new(Properties::new().read()),
            )?
            .build();

        let control_point = sb
            .add_characteristic(
                HID_CONTROL_POINT,
                Attribute::new([0u8]),
                Metadata::new(Properties::new().write_without_response()),
            )?
            .build();

        let protocol_mode = sb
            .add_characteristic(
                PROTOCOL_MODE,
                Attribute::new([PROTOCOL_MODE_BOOT]),
                Metadata::new(Properties::new().read().write_without_response()),
            )?
            .build();

        let mut input_report = sb.add_characteristic(
            HID_REPORT,
            Attribute::new([0u8; KEYBOARD_REPORT_SIZE]),
            Metadata::new(Properties::new().read().notify()),
        )?;
        let input_report_reference = input_report.add_descriptor(
            REPORT_REFERENCE,
            Attribute::new([KEYBOARD_REPORT_ID, REPORT_TYPE_INPUT]),
        )?;
        let input_report = input_report.build();

        let boot_input = sb
            .add_characteristic(
                BOOT_KEYBOARD_INPUT,
                Attribute::new([0u8; KEYBOARD_REPORT_SIZE]),
                Metadata::new(Properties::new().read().notify()),
            )?
            .build();

        let boot_output = sb
            .add_characteristic(
                BOOT_KEYBOARD_OUTPUT,
                Attribute::new([0u8]),
                Metadata::new(Properties::new().read().write().write_without_response()),
            )?
            .build();

        let _service_handle = sb.build();

        Ok(Self {
            hid_info: hid_info.value_handle,
            report_map: report_map.value_handle,
            control_point: control_point.value_handle,
            protocol_mode: protocol_mode.value_handle,
            input_report: input_report.value_handle,
            input_report_cccd: input_report.cccd_handle,
            input_report_reference: input_report_reference.handle(),
            boot_input: boot_input.value_handle,
            boot_input_cccd: boot_input.cccd_handle,
            boot_output: boot_output.value_handle,
        })
    }

    pub fn report_handles(&self) -> ReportHandles {
        ReportHandles {
            boot_input: self.boot_input,
            input_report: self.input_report,
        }
    }

    fn on_write(&self, sd: &Softdevice, link: &Link, handle: u16, data: &[u8]) {
        if handle == self.boot_input_cccd {
            link.on_cccd_write(ReportChannel::Boot, data);
        } else if handle == self.input_report_cccd {
            link.on_cccd_write(ReportChannel::Report, data);
        } else if handle == self.protocol_mode {
            if link.on_protocol_mode_write(data).is_none() {
                warn!("[HID] ignoring protocol mode write {=[u8]:#x}", data);
                // Keep the readable value in step with the state machine.
                let current = [link.protocol_mode().code()];
                if let Err(e) = gatt_server::set_value(sd, self.protocol_mode, &current) {
                    warn!("[HID] failed to restore protocol mode value: {}", e);
                }
            }
        } else if handle == self.control_point {
            match data.first() {
                Some(0x00) => info!("[HID] host suspend"),
                Some(0x01) => info!("[HID] host exit suspend"),
                _ => debug!("[HID] control point write {=[u8]:#x}", data),
            }
        } else if handle == self.boot_output {
            debug!("[HID] LED state {=[u8]:#x}", data);
        }
    }
}

/// Device Information service with the manufacturer string.
pub struct DeviceInformationService {}

impl DeviceInformationService {
    pub fn new(sd: &mut Softdevice) -> Result<Self, RegisterError> {
        let mut sb = ServiceBuilder::new(sd, DEVICE_INFORMATION_SERVICE)?;
        sb.add_characteristic(
            MANUFACTURER_NAME,
            Attribute::new(BLE_MANUFACTURER),
            Metadata::new(Properties::new().read()),
        )?
        .build();
        let _service_handle = sb.build();
        Ok(Self {})
    }
}

/// All registered services plus the link their writes feed into.
pub struct Server {
    sd: &'static Softdevice,
    _dis: DeviceInformationService,
    hid: HidService,
    link: &'static Link,
}

impl Server {
    pub fn new(
        sd: &'static Softdevice,
        dis: DeviceInformationService,
        hid: HidService,
        link: &'static Link,
    ) -> Self {
        Self {
            sd,
            _dis: dis,
            hid,
            link,
        }
    }
}

impl gatt_server::Server for Server {
    type Event = ();

    fn on_write(
        &self,
        _conn: &Connection,
        handle: u16,
        _op: WriteOp,
        _offset: usize,
        data: &[u8],
    ) -> Option<Self::Event> {
        self.hid.on_write(self.sd, self.link, handle, data);
        None
    }
}
