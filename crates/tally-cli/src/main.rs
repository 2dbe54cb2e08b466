//! Tally CLI - AI-assisted personal finance tracker
//!
//! Usage:
//!   tally scan receipt.jpg            Scan a receipt via the AI service
//!   tally import statement.csv        Import a statement offline
//!   tally add -a -12.50 -d "lunch"    Record an expense by hand
//!   tally insights                    Generate advisory insights

mod cli;
mod commands;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tally_core::Catalog;

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    // The catalog comes from configuration at startup: a JSON file named by
    // TALLY_CATALOG, or the built-in defaults.
    let catalog = match std::env::var("TALLY_CATALOG") {
        Ok(path) => Catalog::from_path(std::path::Path::new(&path))?,
        Err(_) => Catalog::default_catalog(),
    };

    let ledger_path = cli.ledger.unwrap_or_else(store::default_ledger_path);

    match cli.command {
        Commands::Scan { file, kind, mock } => {
            commands::cmd_scan(&ledger_path, &catalog, &file, &kind, mock).await
        }
        Commands::Import { file, format } => {
            commands::cmd_import(&ledger_path, &catalog, &file, &format)
        }
        Commands::Add {
            amount,
            category,
            description,
            method,
            date,
        } => commands::cmd_add(
            &ledger_path,
            &catalog,
            amount,
            category.as_deref(),
            &description,
            &method,
            date.as_deref(),
        ),
        Commands::Budget { action } => match action {
            None | Some(BudgetAction::List) => commands::cmd_budget_list(&ledger_path, &catalog),
            Some(BudgetAction::Set { category, amount }) => {
                commands::cmd_budget_set(&ledger_path, &catalog, &category, amount)
            }
        },
        Commands::Summary { json } => commands::cmd_summary(&ledger_path, &catalog, json),
        Commands::Insights { json } => commands::cmd_insights(&ledger_path, &catalog, json),
        Commands::Categories => commands::cmd_categories(&catalog),
        Commands::Recategorize { id, category } => {
            commands::cmd_recategorize(&ledger_path, &catalog, &id, &category)
        }
    }
}
