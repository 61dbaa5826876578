//! Patra journal peripheral for ESP32
//!
//! This firmware serves the compiled-in journal table over a BLE GATT
//! notification channel. A central writes `get` to start a transfer and
//! `OK` to request each following page; the state machine itself lives in
//! the transport-neutral `patra-core` crate.

mod ble;

use log::*;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    info!("Patra journal peripheral v0.1");

    ble::start_ble_server(patra_proto::ble::DEVICE_NAME);

    info!("Waiting for a client connection to notify...");

    // Everything runs inside the BLE write callbacks; nothing to do here.
    loop {
        std::thread::sleep(std::time::Duration::from_secs(1));
    }
}
