pub mod config;
pub mod migrate;

use std::path::Path;

use anyhow::{Context, Result};
use customer_service::config::Config;

/// Load configuration from an explicit file, or from the standard locations
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Config::load().context("Failed to load configuration"),
    }
}
