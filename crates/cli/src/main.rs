//! Order Desk CLI - Database migrations and demo data.
//!
//! # Usage
//!
//! ```bash
//! # Apply the server's SQL migrations
//! od-cli migrate
//!
//! # Register the demo client and one order
//! od-cli seed
//! ```
//!
//! # Environment Variables
//!
//! - `ORDERDESK_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "od-cli")]
#[command(author, version, about = "Order Desk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with a demo client and order
    Seed,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::demo().await?,
    }
    Ok(())
}
