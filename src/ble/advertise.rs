//! Connectable advertising as a keyboard.

use defmt::{info, warn};
use nrf_softdevice::ble::advertisement_builder::{
    AdvertisementDataType, Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload,
    ServiceList, ServiceUuid16,
};
use nrf_softdevice::ble::peripheral::{self, AdvertiseError, ConnectableAdvertisement};
use nrf_softdevice::ble::Connection;
use nrf_softdevice::Softdevice;

use uart2ble::config::{BLE_ADV_INTERVAL, BLE_APPEARANCE_KEYBOARD, BLE_DEVICE_NAME};
use uart2ble::error::BleError;

const APPEARANCE: [u8; 2] = BLE_APPEARANCE_KEYBOARD.to_le_bytes();

static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_16(ServiceList::Incomplete, &[ServiceUuid16::HUMAN_INTERFACE_DEVICE])
    // Lets hosts show a keyboard icon before connecting.
    .raw(AdvertisementDataType::APPEARANCE, &APPEARANCE)
    .full_name(BLE_DEVICE_NAME)
    .build();

static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_16(
        ServiceList::Complete,
        &[
            ServiceUuid16::DEVICE_INFORMATION,
            ServiceUuid16::HUMAN_INTERFACE_DEVICE,
        ],
    )
    .build();

/// Advertise until a central connects.
pub async fn advertise(sd: &Softdevice) -> Result<Connection, BleError> {
    let config = peripheral::Config {
        interval: BLE_ADV_INTERVAL,
        ..Default::default()
    };
    let adv = ConnectableAdvertisement::ScannableUndirected {
        adv_data: &ADV_DATA,
        scan_data: &SCAN_DATA,
    };

    info!("[BLE] advertising as \"{=str}\"", BLE_DEVICE_NAME);
    peripheral::advertise_connectable(sd, adv, &config)
        .await
        .map_err(|e| {
            warn!("[BLE] advertise error: {}", e);
            match e {
                AdvertiseError::Raw(raw) => BleError::Raw(raw as u32),
                _ => BleError::AdvertiseFailed,
            }
        })
}
