use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::application::LedgerService;
use crate::domain::format_amount;
use crate::server;

/// Wallet Ledger - single-wallet deposit/withdrawal service
#[derive(Parser)]
#[command(name = "wallet-ledger")]
#[command(about = "A single-wallet ledger served over HTTP")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "WALLET_DATABASE", default_value = "wallet.db")]
    pub database: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "WALLET_BIND", default_value = "127.0.0.1:8080")]
        bind: String,
    },

    /// Verify that the stored balance matches the transaction log
    Check,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Serve { bind } => {
                // Migrations are idempotent, so serving a fresh path just works
                let service = LedgerService::init(&self.database).await?;
                server::serve(Arc::new(service), &bind).await?;
            }

            Commands::Check => {
                let service = LedgerService::connect(&self.database).await?;
                run_check_command(&service).await?;
            }
        }

        Ok(())
    }
}

async fn run_check_command(service: &LedgerService) -> Result<()> {
    println!("Checking ledger integrity...\n");

    let report = service.check_integrity().await?;

    println!("Wallet:       {}", if report.wallet_exists { "present" } else { "missing" });
    println!("Transactions: {}", report.transaction_count);
    println!();

    let stored = report
        .stored_balance
        .map(format_amount)
        .unwrap_or_else(|| "-".to_string());
    println!("  {:<12} {:>16}", "Stored:", stored);
    println!("  {:<12} {:>16}", "Computed:", format_amount(report.computed_balance));
    println!();

    if report.is_healthy() {
        println!("Ledger is consistent.");
    } else {
        println!("Issues found:");
        for issue in &report.issues {
            println!("  - {}", issue);
        }
        anyhow::bail!("Ledger integrity check failed");
    }

    Ok(())
}
