//! Clap derive structures for the `silowatch` CLI.
//!
//! Defines the command tree, global flags, and shared argument types.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use silowatch_core::DeviceClass;

// ── Top-level CLI ────────────────────────────────────────────────────

/// silowatch -- warehouse automation status from the command line
#[derive(Debug, Parser)]
#[command(
    name = "silowatch",
    version,
    about = "Monitor warehouse automation devices from the command line",
    long_about = "Reads stacker crane, transfer bridge, and transfer car status\n\
        from the plant backends (PLC gateway + database mirror), with tiered\n\
        fallback and explicit staleness reporting.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file path (default: platform config dir)
    #[arg(long, env = "SILOWATCH_CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Plant host serving both backends (overrides config)
    #[arg(long, short = 'H', env = "SILOWATCH_HOST", global = true)]
    pub host: Option<String>,

    /// Full PLC gateway base URL (overrides host resolution)
    #[arg(long, env = "SILOWATCH_GATEWAY", global = true)]
    pub gateway: Option<String>,

    /// Full database mirror base URL (overrides host resolution)
    #[arg(long, env = "SILOWATCH_MIRROR", global = true)]
    pub mirror: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SILOWATCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SILOWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & color enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Device argument ──────────────────────────────────────────────────

/// Parse a device class name (`crane1`, `crane2`, `bridge`,
/// `transfer-car`) for clap.
pub fn parse_device(raw: &str) -> Result<DeviceClass, String> {
    DeviceClass::from_str(raw)
        .map_err(|_| format!("expected one of: crane1, crane2, bridge, transfer-car (got '{raw}')"))
}

// ── Top-level command enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current device status (one device, or all)
    #[command(alias = "st")]
    Status {
        /// Device class (omit for all configured devices)
        #[arg(value_parser = parse_device)]
        device: Option<DeviceClass>,
    },

    /// Show recent status history for a device
    #[command(alias = "hist")]
    History {
        /// Device class
        #[arg(value_parser = parse_device)]
        device: DeviceClass,

        /// Number of entries
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Ask the backend to refresh a device's state from the PLC
    Sync {
        /// Device class (bridge or transfer-car)
        #[arg(value_parser = parse_device)]
        device: DeviceClass,
    },

    /// Inspect and acknowledge alarms
    #[command(alias = "al")]
    Alarms(AlarmsArgs),

    /// Poll continuously and print reading changes until interrupted
    #[command(alias = "w")]
    Watch {
        /// Device class (omit for all configured devices)
        #[arg(value_parser = parse_device)]
        device: Option<DeviceClass>,

        /// Poll interval (e.g. "10s", "500ms")
        #[arg(long, short = 'i', value_parser = humantime::parse_duration)]
        interval: Option<Duration>,
    },

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

// ── Alarms subcommands ───────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AlarmsArgs {
    #[command(subcommand)]
    pub command: AlarmsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlarmsCommand {
    /// List alarms from the crane feeds, newest first
    List {
        /// Only show unacknowledged alarms
        #[arg(long, short = 'u')]
        unacknowledged: bool,
    },

    /// Acknowledge an alarm by id
    Ack {
        /// Alarm id (as shown by `alarms list`)
        id: String,
    },

    /// Stream alarms live until interrupted
    Watch,
}

// ── Config subcommands ───────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file + environment)
    Show,

    /// Write a config file populated with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn device_names_parse() {
        assert_eq!(parse_device("crane1"), Ok(DeviceClass::Crane1));
        assert_eq!(parse_device("transfer-car"), Ok(DeviceClass::TransferCar));
        assert!(parse_device("elevator").is_err());
    }
}
