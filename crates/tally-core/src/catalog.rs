//! Category catalog
//!
//! The catalog is a static table of category definitions loaded once at
//! startup, either the built-in defaults or a JSON file supplied by
//! configuration. The pipeline never mutates it.

use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{BudgetBook, Category};

/// Sentinel category returned by the classifier when nothing matches.
/// Present in the catalog.
pub const OTHER_CATEGORY: &str = "other";

/// Sentinel category for credits. Not a catalog entry.
pub const INCOME_CATEGORY: &str = "income";

/// Immutable category catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog from category records, rejecting duplicate ids
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        for (i, category) in categories.iter().enumerate() {
            if categories[..i].iter().any(|c| c.id == category.id) {
                return Err(Error::Config(format!(
                    "duplicate category id: {}",
                    category.id
                )));
            }
        }
        Ok(Self { categories })
    }

    /// The built-in default catalog
    pub fn default_catalog() -> Self {
        let categories = [
            ("food", "Food & Dining", "#ef4444", 500.0),
            ("rent", "Housing & Rent", "#3b82f6", 1200.0),
            ("transport", "Transportation", "#22c55e", 300.0),
            ("utilities", "Utilities", "#f59e0b", 200.0),
            ("entertainment", "Entertainment", "#8b5cf6", 150.0),
            ("health", "Healthcare", "#ec4899", 100.0),
            ("shopping", "Shopping", "#06b6d4", 200.0),
            ("travel", "Travel", "#14b8a6", 300.0),
            ("education", "Education", "#f97316", 100.0),
            ("other", "Other", "#6b7280", 100.0),
        ]
        .into_iter()
        .map(|(id, name, color, default_budget)| Category {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            default_budget,
        })
        .collect();

        Self { categories }
    }

    /// Load a catalog from a JSON file (array of category records)
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let categories: Vec<Category> = serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid catalog file: {}", e)))?;
        if categories.is_empty() {
            return Err(Error::Config("catalog file has no categories".into()));
        }
        Self::new(categories)
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Display name for a category id, "Unknown" when absent
    pub fn name_of(&self, id: &str) -> &str {
        self.get(id).map(|c| c.name.as_str()).unwrap_or("Unknown")
    }

    /// Resolve a free-form category reference to a catalog id, matching by
    /// id first and then case-insensitively by display name
    pub fn resolve(&self, reference: &str) -> Option<&str> {
        let reference = reference.trim();
        if let Some(category) = self.get(reference) {
            return Some(category.id.as_str());
        }
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(reference))
            .map(|c| c.id.as_str())
    }

    /// Budget set seeded from every category's default budget
    pub fn default_budgets(&self) -> BudgetBook {
        let mut book = BudgetBook::new();
        for category in &self.categories {
            book.upsert(category.id.clone(), category.default_budget);
        }
        book
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}
