//! Ledger persistence
//!
//! All CLI state lives in one JSON file: the transaction list and the
//! budget book. Budgets are seeded from the catalog defaults the first
//! time the ledger is touched.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tally_core::{BudgetBook, Catalog, Transaction};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: BudgetBook,
}

impl Ledger {
    /// Load the ledger, or start a fresh one seeded with default budgets
    pub fn load_or_init(path: &Path, catalog: &Catalog) -> Result<Self> {
        if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read ledger {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("ledger {} is not valid JSON", path.display()))
        } else {
            Ok(Self {
                transactions: Vec::new(),
                budgets: catalog.default_budgets(),
            })
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("failed to write ledger {}", path.display()))
    }
}

/// Default ledger location under the platform data directory
pub fn default_ledger_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("tally").join("ledger.json"))
        .unwrap_or_else(|| PathBuf::from("tally-ledger.json"))
}
