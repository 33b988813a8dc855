use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use customer_service::database::{create_pool, migration_status, run_migrations, MigrationStatus};

use super::load_config;

#[derive(Subcommand)]
pub enum MigrateCommands {
    /// Apply every pending migration
    Up {
        /// Configuration file (defaults to the standard search path)
        #[arg(short, long, value_name = "PATH", env = "CUSTOMER_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Show applied and pending migrations
    Status {
        /// Configuration file (defaults to the standard search path)
        #[arg(short, long, value_name = "PATH", env = "CUSTOMER_CONFIG")]
        config: Option<PathBuf>,
    },
}

pub async fn execute(command: MigrateCommands) -> Result<()> {
    match command {
        MigrateCommands::Up { config } => up(config).await,
        MigrateCommands::Status { config } => status(config).await,
    }
}

async fn up(config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let pool = create_pool(&config.database)
        .await
        .with_context(|| format!("Failed to connect to {}", config.database.sanitized_url()))?;

    run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    println!("{} Migrations applied", "✓".green().bold());
    Ok(())
}

async fn status(config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let pool = create_pool(&config.database)
        .await
        .with_context(|| format!("Failed to connect to {}", config.database.sanitized_url()))?;

    let migrations = migration_status(&pool)
        .await
        .context("Failed to read migration status")?;

    for line in render_status(&migrations) {
        println!("{}", line);
    }

    let pending = migrations.iter().filter(|m| !m.applied).count();
    if pending > 0 {
        println!("\n{} {} pending migration(s)", "!".yellow().bold(), pending);
    }
    Ok(())
}

fn render_status(migrations: &[MigrationStatus]) -> Vec<String> {
    migrations
        .iter()
        .map(|m| {
            let state = if m.applied {
                "applied".green()
            } else {
                "pending".yellow()
            };
            format!("{:>14}  {:<8}  {}", m.version, state, m.description)
        })
        .collect()
}
