//! Domain models for tally

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A spending category from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Stable key referenced by transactions and budgets
    pub id: String,
    pub name: String,
    /// Display token only; pipeline logic never branches on it
    pub color: String,
    /// Budget seeded for this category until the user saves their own
    #[serde(default)]
    pub default_budget: f64,
}

/// Payment method used for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Cash,
    Bank,
    #[default]
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Cash => "cash",
            Self::Bank => "bank",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "card" => Ok(Self::Card),
            "cash" => Ok(Self::Cash),
            "bank" => Ok(Self::Bank),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown payment method: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single signed monetary event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Negative = expense/debit, positive = income/credit
    pub amount: f64,
    /// References a catalog category, or the sentinel "income" for credits
    pub category_id: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
}

impl Transaction {
    /// Replace the category. The only mutation transactions support.
    pub fn recategorize(&mut self, category_id: impl Into<String>) {
        self.category_id = category_id.into();
    }

    pub fn is_credit(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_debit(&self) -> bool {
        self.amount < 0.0
    }
}

/// A per-category spending ceiling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub category_id: String,
    pub amount: f64,
}

/// Budget set with at most one entry per category
///
/// Upsert-by-key semantics keep the one-per-category invariant; lookups for
/// unset categories answer 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetBook {
    budgets: Vec<Budget>,
}

impl BudgetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the budget for a category
    pub fn upsert(&mut self, category_id: impl Into<String>, amount: f64) {
        let category_id = category_id.into();
        match self
            .budgets
            .iter_mut()
            .find(|b| b.category_id == category_id)
        {
            Some(existing) => existing.amount = amount,
            None => self.budgets.push(Budget {
                category_id,
                amount,
            }),
        }
    }

    /// Budget for a category, 0 when none is set
    pub fn amount_for(&self, category_id: &str) -> f64 {
        self.budgets
            .iter()
            .find(|b| b.category_id == category_id)
            .map(|b| b.amount)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Budget> {
        self.budgets.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }
}

impl FromIterator<Budget> for BudgetBook {
    fn from_iter<I: IntoIterator<Item = Budget>>(iter: I) -> Self {
        let mut book = Self::new();
        for budget in iter {
            book.upsert(budget.category_id, budget.amount);
        }
        book
    }
}
