//! Foodgram CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run all database migrations (schema + session store)
//! foodgram migrate
//!
//! # List applied and pending migrations
//! foodgram migrate --status
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "foodgram")]
#[command(author, version, about = "Foodgram CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        /// Only report which migrations are applied
        #[arg(long)]
        status: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { status: false } => commands::migrate::run().await?,
        Commands::Migrate { status: true } => commands::migrate::status().await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_migrate_status_flag() {
        let cli = Cli::try_parse_from(["foodgram", "migrate", "--status"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Migrate { status: true })
        ));
    }
}
