//! Watch command handler: continuous polling with live reading output.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;

use silowatch_core::{DeviceClass, Monitor, MonitorConfig, Reading};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::status;

pub async fn handle(
    mut config: MonitorConfig,
    device: Option<DeviceClass>,
    interval: Option<Duration>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(device) = device {
        config.devices = vec![device];
    }
    if let Some(interval) = interval {
        config.status_interval = interval;
    }
    // Watch streams readings; alarms have their own command.
    config.simulate_alarms = false;

    let devices = config.devices.clone();
    let monitor = Monitor::new(config)?;
    monitor.start().await;

    let color = output::should_color(&global.color);
    if !global.quiet {
        eprintln!("Watching {} device(s) (Ctrl-C to stop)", devices.len());
    }

    // The initial fetch happened in start(); show where we begin.
    for &device in &devices {
        print_reading(device, &monitor.latest(device), &global.output, color);
    }

    // Merge the per-device subscriptions into one channel.
    let (tx, mut rx) = mpsc::channel::<(DeviceClass, Reading)>(16);
    let mut forwarders = Vec::with_capacity(devices.len());
    for &device in &devices {
        let mut subscription = monitor.subscribe(device);
        let tx = tx.clone();
        forwarders.push(tokio::spawn(async move {
            while let Some(reading) = subscription.changed().await {
                if tx.send((device, reading)).await.is_err() {
                    break;
                }
            }
        }));
    }
    drop(tx);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            received = rx.recv() => {
                let Some((device, reading)) = received else { break };
                print_reading(device, &reading, &global.output, color);
            }
        }
    }

    for handle in forwarders {
        handle.abort();
    }
    monitor.shutdown().await;
    Ok(())
}

fn print_reading(device: DeviceClass, reading: &Reading, format: &OutputFormat, color: bool) {
    match format {
        OutputFormat::Json => {
            let entry = status::StatusEntry {
                device,
                reading: reading.clone(),
            };
            if let Ok(line) = serde_json::to_string(&entry) {
                println!("{line}");
            }
        }
        _ => {
            let detail = reading
                .snapshot()
                .map_or_else(|| "-".into(), |s| status::summary(&s.state));
            println!(
                "{}  {:12}  {}  {}",
                Utc::now().format("%H:%M:%S"),
                device.to_string(),
                status::freshness_label(reading, color),
                detail,
            );
        }
    }
}
