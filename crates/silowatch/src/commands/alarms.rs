//! Alarm command handlers.
//!
//! `list` pulls the real crane alarm feeds through a bounded
//! `AlarmStore`; acknowledgements persist across invocations in a small
//! file next to the config. `watch` runs a live monitor (simulator
//! included) and streams alarms until interrupted.

use std::collections::HashSet;
use std::path::PathBuf;

use tabled::Tabled;

use silowatch_core::{Alarm, AlarmStore, DeviceClass, DeviceStatusClient, Monitor, MonitorConfig};

use crate::cli::{AlarmsArgs, AlarmsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlarmRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Ack")]
    acknowledged: String,
}

impl From<&Alarm> for AlarmRow {
    fn from(a: &Alarm) -> Self {
        Self {
            id: a.id.clone(),
            time: a.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            device: a.device_name.clone(),
            severity: format!("{:?}", a.severity),
            message: a.message.clone(),
            acknowledged: if a.acknowledged { "yes" } else { "no" }.into(),
        }
    }
}

// ── Acknowledgement persistence ──────────────────────────────────────

fn acked_path() -> PathBuf {
    let mut path = silowatch_config::config_path();
    path.set_file_name("acked.json");
    path
}

fn load_acked() -> HashSet<String> {
    std::fs::read_to_string(acked_path())
        .ok()
        .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
        .map(HashSet::from_iter)
        .unwrap_or_default()
}

fn save_acked(acked: &HashSet<String>) -> Result<(), CliError> {
    let path = acked_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut ids: Vec<&String> = acked.iter().collect();
    ids.sort();
    std::fs::write(&path, serde_json::to_string_pretty(&ids)?)?;
    Ok(())
}

// ── Feed loading ─────────────────────────────────────────────────────

/// Pull both crane feeds into a bounded store, oldest raised first so
/// the newest alarm ends up at the front.
async fn load_feeds(
    client: &DeviceStatusClient,
    config: &MonitorConfig,
) -> Result<AlarmStore, CliError> {
    let mut alarms: Vec<Alarm> = Vec::new();
    for device in [DeviceClass::Crane1, DeviceClass::Crane2] {
        alarms.extend(client.fetch_alarms(device).await?);
    }
    alarms.sort_by_key(|a| a.timestamp);

    let store = AlarmStore::new(config.alarm_capacity);
    for alarm in alarms {
        store.raise(alarm);
    }
    for id in load_acked() {
        store.acknowledge(&id);
    }
    Ok(store)
}

// ── Handler ──────────────────────────────────────────────────────────

pub async fn handle(
    config: MonitorConfig,
    args: AlarmsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AlarmsCommand::List { unacknowledged } => {
            let client = DeviceStatusClient::new(&config)?;
            let store = load_feeds(&client, &config).await?;

            let snapshot = store.snapshot();
            let alarms: Vec<Alarm> = snapshot
                .iter()
                .filter(|a| !unacknowledged || !a.acknowledged)
                .cloned()
                .collect();

            // Closure, not `AlarmRow::from`: the function item is not
            // general enough over the element lifetime for `Fn(&T) -> R`.
            #[allow(clippy::redundant_closure)]
            let out = output::render_list(
                &global.output,
                &alarms,
                |a| AlarmRow::from(a),
                |a| a.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlarmsCommand::Ack { id } => {
            let client = DeviceStatusClient::new(&config)?;
            let store = load_feeds(&client, &config).await?;

            if !store.acknowledge(&id) {
                return Err(CliError::AlarmNotFound { id });
            }

            let mut acked = load_acked();
            acked.insert(id);
            save_acked(&acked)?;
            if !global.quiet {
                eprintln!("Alarm acknowledged");
            }
            Ok(())
        }

        AlarmsCommand::Watch => watch_alarms(config, global).await,
    }
}

/// Stream alarms live until Ctrl-C.
async fn watch_alarms(config: MonitorConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = Monitor::new(config)?;
    monitor.start().await;

    let mut subscription = monitor.subscribe_alarms();
    let mut seen: HashSet<String> = HashSet::new();

    if !global.quiet {
        eprintln!("Watching alarms (Ctrl-C to stop)");
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = subscription.changed() => {
                let Some(alarms) = changed else { break };
                // Newest first; print only arrivals we have not shown.
                for alarm in alarms.iter().rev() {
                    if seen.insert(alarm.id.clone()) {
                        println!(
                            "{}  {:?}  {}  {}",
                            alarm.timestamp.format("%H:%M:%S"),
                            alarm.severity,
                            alarm.device_name,
                            alarm.message,
                        );
                    }
                }
            }
        }
    }

    monitor.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use silowatch_core::Severity;

    use crate::cli::OutputFormat;

    #[test]
    fn alarm_list_renders_as_a_table() {
        let alarms = vec![
            Alarm::new(
                "TRANS-001",
                "Transelevador T1",
                "Error de posicionamiento",
                Severity::Critical,
                Utc::now(),
            ),
            Alarm::new(
                "PUENTE-001",
                "Puente Transportador",
                "Mantenimiento preventivo",
                Severity::Warning,
                Utc::now(),
            ),
        ];

        #[allow(clippy::redundant_closure)]
        let out = output::render_list(
            &OutputFormat::Table,
            &alarms,
            |a| AlarmRow::from(a),
            |a| a.id.clone(),
        );

        assert!(out.contains("Transelevador T1"));
        assert!(out.contains("Critical"));
        assert!(out.contains("Mantenimiento preventivo"));
    }
}
