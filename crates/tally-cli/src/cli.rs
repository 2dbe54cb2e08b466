//! CLI argument definitions using clap
//!
//! All the clap structs and enums for parsing arguments. The command
//! implementations live in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - track spending, budgets, and advice from your statements
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "AI-assisted personal finance tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger file path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a receipt or statement through the document-AI service
    Scan {
        /// Image or PDF file to scan
        file: PathBuf,

        /// Document kind: receipt or statement
        #[arg(short, long, default_value = "receipt")]
        kind: String,

        /// Use the mock backend instead of Gemini (no network, no API key)
        #[arg(long)]
        mock: bool,
    },

    /// Import a statement file without the AI service
    Import {
        /// Statement file to import
        file: PathBuf,

        /// File format: csv or text
        #[arg(short, long, default_value = "csv")]
        format: String,
    },

    /// Add a transaction by hand
    Add {
        /// Amount (negative for expenses, positive for income)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: f64,

        /// Category id (see `tally categories`); classified from the
        /// description when omitted
        #[arg(short, long)]
        category: Option<String>,

        /// Description
        #[arg(short, long)]
        description: String,

        /// Payment method: card, cash, bank, other
        #[arg(short, long, default_value = "card")]
        method: String,

        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Manage per-category budgets
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// Show income, expenses, and per-category totals
    Summary {
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate advisory insights
    Insights {
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the category catalog
    Categories,

    /// Move a transaction to a different category
    Recategorize {
        /// Transaction id
        id: String,

        /// New category id
        category: String,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// List budgets with current spend
    List,

    /// Set the budget for a category
    Set {
        /// Category id
        category: String,

        /// Monthly budget amount
        amount: f64,
    },
}
