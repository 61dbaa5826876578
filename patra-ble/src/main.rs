//! BLE client tool for Patra journal peripherals
//!
//! Scans for Patra devices and pulls the journal over the notification
//! channel: write `get`, print each page, acknowledge it with `OK`, stop at
//! the zero-length end-of-transmission marker.

use btleplug::api::{Central, Manager as _, Peripheral as _, ScanFilter, WriteType};
use btleplug::platform::{Adapter, Manager, Peripheral};
use clap::{Parser, Subcommand};
use futures::StreamExt;
use std::time::Duration;
use uuid::Uuid;

use patra_proto::{ble, ACK, CMD_GET};

/// How long to wait for each page before declaring the transfer stalled.
const PAGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "patra-ble")]
#[command(about = "BLE client for Patra journal peripherals")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan for Patra devices
    Scan {
        /// Scan duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// Read the full journal off a device
    Read {
        /// Device name or address to connect to
        #[arg(short, long)]
        device: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let manager = Manager::new().await?;
    let adapters = manager.adapters().await?;
    let adapter = adapters
        .into_iter()
        .next()
        .ok_or("No Bluetooth adapter found")?;

    match cli.command {
        Commands::Scan { duration } => {
            scan_devices(&adapter, duration).await?;
        }
        Commands::Read { device } => {
            read_journal(&adapter, device.as_deref()).await?;
        }
    }

    Ok(())
}

/// Parse UUID string into uuid::Uuid
fn journal_char_uuid() -> Uuid {
    Uuid::parse_str(ble::JOURNAL_CHAR_UUID).expect("invalid UUID in patra_proto")
}

/// Match "Patra" or "nimble [Patra]" format
fn is_patra(name: &str) -> bool {
    name.starts_with(ble::DEVICE_NAME) || name.contains("[Patra")
}

async fn scan_devices(adapter: &Adapter, duration: u64) -> Result<(), Box<dyn std::error::Error>> {
    println!("Scanning for {duration} seconds...");

    adapter.start_scan(ScanFilter::default()).await?;
    tokio::time::sleep(Duration::from_secs(duration)).await;

    let peripherals = adapter.peripherals().await?;
    for peripheral in peripherals {
        if let Some(props) = peripheral.properties().await? {
            let name = props.local_name.unwrap_or_else(|| "Unknown".to_string());
            let address = peripheral.address().to_string();
            let rssi = props
                .rssi
                .map(|r| format!("{r} dBm"))
                .unwrap_or_else(|| "-".to_string());
            let tag = if is_patra(&name) { " [patra]" } else { "" };

            println!("{address}  {rssi:>8}  {name}{tag}");
        }
    }

    adapter.stop_scan().await?;
    Ok(())
}

/// Find a Patra device by name/address pattern, or find any Patra device
async fn find_device(
    adapter: &Adapter,
    target: Option<&str>,
) -> Result<Peripheral, Box<dyn std::error::Error>> {
    adapter.start_scan(ScanFilter::default()).await?;
    tokio::time::sleep(Duration::from_secs(5)).await;

    let peripherals = adapter.peripherals().await?;

    for peripheral in peripherals {
        if let Some(props) = peripheral.properties().await? {
            let name = props.local_name.unwrap_or_default();
            let addr = peripheral.address().to_string();

            let matches = match target {
                Some(t) => name.contains(t) || addr.contains(t),
                None => is_patra(&name),
            };

            if matches {
                adapter.stop_scan().await?;
                return Ok(peripheral);
            }
        }
    }

    adapter.stop_scan().await?;
    Err("No Patra device found".into())
}

/// Run one full journal transfer and print the pages to stdout.
async fn read_journal(
    adapter: &Adapter,
    target: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let device = find_device(adapter, target).await?;

    device.connect().await?;
    device.discover_services().await?;

    let char_uuid = journal_char_uuid();
    let characteristics = device.characteristics();
    let journal_char = characteristics
        .iter()
        .find(|c| c.uuid == char_uuid)
        .ok_or("Journal characteristic not found")?;

    device.subscribe(journal_char).await?;
    let mut notifications = device.notifications().await?;

    device.write(journal_char, CMD_GET, WriteType::WithResponse).await?;

    loop {
        let notification = match tokio::time::timeout(PAGE_TIMEOUT, notifications.next()).await {
            Ok(Some(notification)) => notification,
            Ok(None) => {
                let _ = device.disconnect().await;
                return Err("notification stream closed mid-transfer".into());
            }
            Err(_) => {
                let _ = device.disconnect().await;
                return Err("timed out waiting for the next page".into());
            }
        };

        if notification.uuid != char_uuid {
            continue;
        }

        // Zero-length marker: no further pages remain.
        if notification.value.is_empty() {
            break;
        }

        if notification.value.starts_with(b"ER:") {
            let _ = device.disconnect().await;
            return Err(String::from_utf8_lossy(&notification.value)
                .into_owned()
                .into());
        }

        // Pages carry their own line endings.
        print!("{}", String::from_utf8_lossy(&notification.value));
        device.write(journal_char, ACK, WriteType::WithResponse).await?;
    }

    let _ = device.disconnect().await;
    Ok(())
}
