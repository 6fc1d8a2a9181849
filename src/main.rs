//! Debug CLI: decode scale advertisement payloads without a scanner.
//!
//! Payloads are taken from the command line, or from stdin (one hex
//! string per line) when no arguments are given, which is how an
//! external scanning process feeds this tool.

use std::env;
use std::io::{self, BufRead};

use tracing::{info, warn};

use yunmai_scale_rust::infrastructure::logging::init_logger;
use yunmai_scale_rust::{
    process_advertisement, SensorKind, SettingsService, SnapshotMemo, UserProfile, ALL_SENSORS,
};

fn main() -> anyhow::Result<()> {
    let settings_service = SettingsService::new()?;
    let settings = settings_service.get().clone();
    let _logging_guard = init_logger(&settings.log_settings)?;

    info!("Yunmai scale payload decoder started");

    let device = settings
        .device_mac
        .clone()
        .unwrap_or_else(|| "unconfigured".to_string());
    let mut memo = SnapshotMemo::new();

    let payloads: Vec<String> = env::args().skip(1).collect();
    if payloads.is_empty() {
        info!("Reading hex payloads from stdin, one per line");
        for line in io::stdin().lock().lines() {
            let line = line?;
            let payload = line.trim();
            if !payload.is_empty() {
                handle_payload(payload, &settings.profile, &device, &mut memo);
            }
        }
    } else {
        for payload in &payloads {
            handle_payload(payload, &settings.profile, &device, &mut memo);
        }
    }

    Ok(())
}

fn handle_payload(payload: &str, profile: &UserProfile, device: &str, memo: &mut SnapshotMemo) {
    match process_advertisement(payload, profile) {
        Ok(snapshot) => {
            memo.record(device, &snapshot);

            match serde_json::to_string_pretty(&snapshot) {
                Ok(json) => println!("{json}"),
                Err(err) => warn!("Could not serialize snapshot: {err}"),
            }

            if snapshot.is_stable() {
                print_readings(&snapshot);
            } else if let Some(last) = memo.last_stable(device) {
                info!(
                    "No settled reading in this frame; last stable weight {:?} kg",
                    last.weight()
                );
            }
        }
        Err(err) => warn!("Dropping frame: {err}"),
    }
}

fn print_readings(snapshot: &yunmai_scale_rust::MeasurementSnapshot) {
    for sensor in ALL_SENSORS {
        if sensor == SensorKind::Status {
            println!("  {:<16} {}", sensor.name(), snapshot.status_label());
        } else if let Some(value) = sensor.value(snapshot) {
            println!(
                "  {:<16} {} {}",
                sensor.name(),
                value,
                sensor.unit().unwrap_or("")
            );
        }
    }
}
