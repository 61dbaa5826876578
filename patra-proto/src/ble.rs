//! BLE GATT constants for the Patra journal service
//!
//! One service with a single characteristic carrying both directions: the
//! central writes commands to it, the peripheral pushes pages back as
//! notifications on the same characteristic.

/// Journal service UUID
pub const SERVICE_UUID: &str = "4fafc201-1fb5-459e-8fcc-c5c9c331914b";

/// Journal characteristic UUID (write/notify)
pub const JOURNAL_CHAR_UUID: &str = "0000fe41-8e22-4541-9d4c-21edae82ed19";

/// Advertised device name
pub const DEVICE_NAME: &str = "Patra";
