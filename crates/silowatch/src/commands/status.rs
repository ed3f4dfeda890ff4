//! Status command handler, plus row/label helpers shared with the
//! history and watch commands.

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::Tabled;

use silowatch_core::{
    DeviceClass, DeviceState, DeviceStatusClient, MonitorConfig, Origin, Reading,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Serializable entry / table row ───────────────────────────────────

#[derive(Serialize)]
pub(crate) struct StatusEntry {
    pub device: DeviceClass,
    pub reading: Reading,
}

#[derive(Tabled)]
pub(crate) struct StatusRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Freshness")]
    freshness: String,
    #[tabled(rename = "Origin")]
    origin: String,
    #[tabled(rename = "Captured")]
    captured: String,
    #[tabled(rename = "State")]
    state: String,
}

pub(crate) fn status_row(entry: &StatusEntry, color: bool) -> StatusRow {
    match entry.reading.snapshot() {
        Some(snap) => StatusRow {
            device: entry.device.to_string(),
            freshness: freshness_label(&entry.reading, color),
            origin: origin_label(snap.origin).into(),
            captured: snap.captured_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            state: summary(&snap.state),
        },
        None => StatusRow {
            device: entry.device.to_string(),
            freshness: freshness_label(&entry.reading, color),
            origin: "-".into(),
            captured: "-".into(),
            state: "-".into(),
        },
    }
}

// ── Labels ───────────────────────────────────────────────────────────

pub(crate) fn freshness_label(reading: &Reading, color: bool) -> String {
    match reading {
        Reading::Fresh(_) if color => "fresh".green().to_string(),
        Reading::Fresh(_) => "fresh".into(),
        Reading::Stale(_) if color => "stale".yellow().to_string(),
        Reading::Stale(_) => "stale".into(),
        Reading::Unavailable if color => "unavailable".red().to_string(),
        Reading::Unavailable => "unavailable".into(),
    }
}

pub(crate) fn origin_label(origin: Origin) -> &'static str {
    match origin {
        Origin::Mirror => "mirror",
        Origin::Gateway => "gateway",
        Origin::Placeholder => "placeholder",
    }
}

/// One-line state summary per device class.
pub(crate) fn summary(state: &DeviceState) -> String {
    match state {
        DeviceState::Crane(s) => format!(
            "mode {}, pallet {}, aisle {}, pos ({},{},{}){}{}",
            s.mode,
            s.pallet_id,
            s.aisle,
            s.x,
            s.y,
            s.z,
            if s.occupied { ", occupied" } else { "" },
            if s.fault { ", FAULT" } else { "" },
        ),
        DeviceState::Bridge(s) => format!(
            "state {}, situation {}, position {}{}",
            s.state,
            s.situation,
            s.position,
            if s.occupied { ", occupied" } else { "" },
        ),
        DeviceState::TransferCar(s) => format!(
            "{}, {:?} mode, cycle {}, aisle {} -> {}{}",
            if s.connected { "connected" } else { "disconnected" },
            s.mode,
            s.work_cycle,
            s.aisle,
            s.target_aisle,
            if s.fault { ", FAULT" } else { "" },
        ),
    }
}

fn kind(reading: &Reading) -> &'static str {
    match reading {
        Reading::Fresh(_) => "fresh",
        Reading::Stale(_) => "stale",
        Reading::Unavailable => "unavailable",
    }
}

// ── Handler ──────────────────────────────────────────────────────────

pub async fn handle(
    config: MonitorConfig,
    device: Option<DeviceClass>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let devices = device.map_or_else(|| config.devices.clone(), |d| vec![d]);
    let client = DeviceStatusClient::new(&config)?;

    let mut entries = Vec::with_capacity(devices.len());
    for device in devices {
        let reading = client.fetch_status(device).await;
        entries.push(StatusEntry { device, reading });
    }

    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        &entries,
        |e| status_row(e, color),
        |e| format!("{}\t{}", e.device, kind(&e.reading)),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
