use clap::{Parser, Subcommand};
use colored::Colorize;

mod commands;

use commands::config::ConfigCommands;
use commands::migrate::MigrateCommands;

/// customer-admin - operator tooling for customer-service
#[derive(Parser)]
#[command(name = "customer-admin")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database schema migrations
    Migrate {
        #[command(subcommand)]
        command: MigrateCommands,
    },
    /// Configuration inspection
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate { command } => commands::migrate::execute(command).await,
        Commands::Config { command } => commands::config::execute(command).await,
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);

            if let Some(source) = e.source() {
                eprintln!("\n{} {}", "Caused by:".yellow(), source);
            }

            std::process::exit(1);
        }
    }
}
