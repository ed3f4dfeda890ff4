//! Sync command handler.
//!
//! Failure always reaches the operator: a sync that did not happen
//! exits nonzero instead of showing stored data as if it refreshed.

use silowatch_core::{DeviceClass, DeviceStatusClient, MonitorConfig, Reading};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::status;

pub async fn handle(
    config: MonitorConfig,
    device: DeviceClass,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = DeviceStatusClient::new(&config)?;

    match client.request_sync(device).await? {
        // Bridge sync returns the freshly synchronized row; show it.
        Some(snapshot) => {
            let entry = status::StatusEntry {
                device,
                reading: Reading::Fresh(snapshot),
            };
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                std::slice::from_ref(&entry),
                |e| status::status_row(e, color),
                |e| e.device.to_string(),
            );
            output::print_output(&out, global.quiet);
            if !global.quiet {
                eprintln!("{device} synchronized from PLC");
            }
        }
        // Transfer car sync is ack-only.
        None => {
            if !global.quiet {
                eprintln!("{device} sync acknowledged by backend");
            }
        }
    }
    Ok(())
}
