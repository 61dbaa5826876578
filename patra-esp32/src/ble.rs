//! BLE GATT server wiring for the journal service
//!
//! One service with a single characteristic: centrals write commands to it
//! and receive journal pages back as notifications on the same
//! characteristic. Every inbound write is fed straight into the
//! `JournalService` state machine; the write callback is the only place the
//! protocol runs.

use esp32_nimble::{
    uuid128,
    utilities::{mutex::Mutex as BleMutex, BleUuid},
    BLECharacteristic, BLEDevice, NimbleProperties,
};
use log::*;
use std::sync::{Arc, Mutex};

use patra_core::{default_journal, JournalService, Notifier};

// These must match patra_proto::ble::{SERVICE_UUID, JOURNAL_CHAR_UUID}.
// We use the uuid128! macro for compile-time generation of BleUuid.
const SERVICE_UUID: BleUuid = uuid128!("4fafc201-1fb5-459e-8fcc-c5c9c331914b");
const JOURNAL_CHAR_UUID: BleUuid = uuid128!("0000fe41-8e22-4541-9d4c-21edae82ed19");

/// Notifier backed by the journal characteristic: store the value, then
/// signal the notification. NimBLE drops the send silently while no client
/// is subscribed, which is exactly the contract the core expects.
struct CharacteristicNotifier {
    characteristic: Arc<BleMutex<BLECharacteristic>>,
}

impl Notifier for CharacteristicNotifier {
    fn notify(&mut self, message: &[u8]) {
        let mut characteristic = self.characteristic.lock();
        characteristic.set_value(message);
        characteristic.notify();
    }
}

/// Start the BLE GATT server and begin advertising the journal service.
pub fn start_ble_server(device_name: &str) {
    let ble_device = BLEDevice::take();

    // Set the device name (this is what shows up in BLE scans)
    BLEDevice::set_device_name(device_name).expect("Failed to set device name");

    let server = ble_device.get_server();

    server.on_connect(|server, desc| {
        info!("BLE client connected");
        let _ = server.update_conn_params(desc.conn_handle(), 24, 48, 0, 60);
    });

    server.on_disconnect(|_desc, _reason| {
        info!("BLE client disconnected");
    });

    let service = server.create_service(SERVICE_UUID);

    let journal_char = service.lock().create_characteristic(
        JOURNAL_CHAR_UUID,
        NimbleProperties::READ
            | NimbleProperties::WRITE
            | NimbleProperties::NOTIFY
            | NimbleProperties::INDICATE,
    );

    // The service instance owns the protocol state; the write callback is
    // never re-entered concurrently, the mutex only satisfies the 'static
    // closure bound.
    let journal = Arc::new(Mutex::new(JournalService::new(default_journal())));
    let mut out = CharacteristicNotifier {
        characteristic: journal_char.clone(),
    };

    journal_char.lock().on_write(move |args| {
        if let Ok(mut service) = journal.lock() {
            service.handle_write(args.recv_data(), &mut out);
        }
    });

    let advertising = ble_device.get_advertising();
    advertising
        .lock()
        .set_data(
            esp32_nimble::BLEAdvertisementData::new()
                .name(device_name)
                .add_service_uuid(SERVICE_UUID),
        )
        .expect("Failed to set advertising data");

    advertising.lock().start().expect("Failed to start BLE advertising");
    info!("BLE advertising started as '{}'", device_name);
}
