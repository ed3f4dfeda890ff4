mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use silowatch_core::MonitorConfig;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Diagnostics go to stderr; stdout is reserved for command output
    // so plain/json modes stay machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Completions don't need backend configuration
        Command::Completions { shell } => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "silowatch", &mut std::io::stdout());
            Ok(())
        }

        // Config inspection must work even when the backend section is
        // invalid, so it runs before monitor-config validation
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        cmd => {
            let config = build_monitor_config(&cli.global)?;
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, config, &cli.global).await
        }
    }
}

/// Build a `MonitorConfig` from the config file, environment, and CLI
/// flag overrides.
fn build_monitor_config(global: &GlobalOpts) -> Result<MonitorConfig, CliError> {
    let mut cfg = match global.config {
        Some(ref path) => silowatch_config::load_config_from(path)?,
        None => silowatch_config::load_config()?,
    };

    if let Some(ref host) = global.host {
        cfg.backend.host = host.clone();
    }
    if let Some(ref gateway) = global.gateway {
        cfg.backend.gateway = Some(gateway.clone());
    }
    if let Some(ref mirror) = global.mirror {
        cfg.backend.mirror = Some(mirror.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.backend.timeout = timeout;
    }

    Ok(silowatch_config::monitor_config(&cfg)?)
}
