//! Command dispatch: bridges CLI args -> core operations -> output
//! formatting.

pub mod alarms;
pub mod config_cmd;
pub mod history;
pub mod status;
pub mod sync;
pub mod watch;

use silowatch_core::MonitorConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    config: MonitorConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status { device } => status::handle(config, device, global).await,
        Command::History { device, limit } => history::handle(config, device, limit, global).await,
        Command::Sync { device } => sync::handle(config, device, global).await,
        Command::Alarms(args) => alarms::handle(config, args, global).await,
        Command::Watch { device, interval } => watch::handle(config, device, interval, global).await,
        // Completions and config are handled before dispatch
        Command::Completions { .. } | Command::Config(_) => unreachable!(),
    }
}
