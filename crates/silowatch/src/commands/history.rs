//! History command handler.

use tabled::Tabled;

use silowatch_core::{DeviceClass, DeviceStatusClient, MonitorConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::status;

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Captured")]
    captured: String,
    #[tabled(rename = "Origin")]
    origin: String,
    #[tabled(rename = "State")]
    state: String,
}

pub async fn handle(
    config: MonitorConfig,
    device: DeviceClass,
    limit: Option<usize>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let limit = limit.unwrap_or(config.history_limit);
    let client = DeviceStatusClient::new(&config)?;

    let snapshots = client.fetch_history(device, limit).await?;

    let index = std::cell::Cell::new(0_usize);
    let out = output::render_list(
        &global.output,
        &snapshots,
        |snap| {
            index.set(index.get() + 1);
            HistoryRow {
                index: index.get(),
                captured: snap.captured_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                origin: status::origin_label(snap.origin).into(),
                state: status::summary(&snap.state),
            }
        },
        |snap| snap.captured_at.to_rfc3339(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
