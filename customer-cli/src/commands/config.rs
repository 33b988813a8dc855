use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use customer_service::config::Config;

use super::load_config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Load and validate configuration, then print the effective values
    Check {
        /// Configuration file (defaults to the standard search path)
        #[arg(short, long, value_name = "PATH", env = "CUSTOMER_CONFIG")]
        config: Option<PathBuf>,
    },
}

pub async fn execute(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Check { config } => check(config),
    }
}

fn check(path: Option<PathBuf>) -> Result<()> {
    let config = load_config(path.as_deref())?;
    let rendered = render(&config)?;

    println!("{} Configuration is valid\n", "✓".green().bold());
    println!("{}", rendered);
    Ok(())
}

/// Effective configuration as TOML, with the database password masked
fn render(config: &Config) -> Result<String> {
    let mut redacted = config.clone();
    redacted.database.url = config.database.sanitized_url();
    toml::to_string_pretty(&redacted).context("Failed to render configuration")
}
