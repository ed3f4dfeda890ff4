//! Config subcommand handlers.
//!
//! `show` prints the effective configuration (file + environment),
//! `init` writes a default config file, `path` prints where it lives.

use std::path::PathBuf;

use silowatch_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// The config file in effect: `--config` override or the platform path.
fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(silowatch_config::config_path)
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = match global.config {
                Some(ref path) => silowatch_config::load_config_from(path)?,
                None => silowatch_config::load_config()?,
            };
            let out = render(&global.output, &cfg)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config_file(global);
            if path.exists() && !force {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!(
                        "{} already exists (pass --force to overwrite)",
                        path.display()
                    ),
                });
            }
            silowatch_config::save_config_to(&path, &Config::default())?;
            if !global.quiet {
                eprintln!("Configuration written to {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config_file(global).display().to_string(), global.quiet);
            Ok(())
        }
    }
}

/// Table and plain modes print TOML, the on-disk syntax.
fn render(format: &OutputFormat, cfg: &Config) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Table | OutputFormat::Plain => {
            toml::to_string_pretty(cfg).map_err(|e| CliError::Internal(e.to_string()))?
        }
        OutputFormat::Json => serde_json::to_string_pretty(cfg)?,
        OutputFormat::Yaml => {
            serde_yaml::to_string(cfg).map_err(|e| CliError::Internal(e.to_string()))?
        }
    })
}
