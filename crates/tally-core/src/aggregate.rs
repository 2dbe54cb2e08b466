//! Aggregation engine
//!
//! Derives totals from a transaction list. Nothing here is stored; callers
//! recompute from the current list on every query.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Spending total for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    /// Month name ("January", ...)
    pub label: String,
    /// Debit total, absolute value
    pub total: f64,
}

/// Derived totals for a transaction list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of positive amounts
    pub total_income: f64,
    /// Sum of absolute values of negative amounts
    pub total_expenses: f64,
    /// Debit totals per category. Categories without debits are absent,
    /// never zero-valued; union with the catalog for a full sweep.
    pub by_category: HashMap<String, f64>,
    /// (income − expenses) / income × 100, only defined when income > 0
    pub savings_rate: Option<f64>,
    /// Debit totals per month name, ordered by chronological first
    /// occurrence in the input
    pub monthly: Vec<MonthTotal>,
}

impl Summary {
    pub fn surplus(&self) -> f64 {
        self.total_income - self.total_expenses
    }

    /// Debit total for a category, 0 when it has none
    pub fn spent(&self, category_id: &str) -> f64 {
        self.by_category.get(category_id).copied().unwrap_or(0.0)
    }
}

/// Compute a summary over a transaction list.
///
/// Pure and deterministic for a given input.
pub fn aggregate(transactions: &[Transaction]) -> Summary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut by_category: HashMap<String, f64> = HashMap::new();
    let mut monthly: Vec<MonthTotal> = Vec::new();

    for tx in transactions {
        if tx.amount > 0.0 {
            total_income += tx.amount;
            continue;
        }
        if tx.amount < 0.0 {
            let spent = tx.amount.abs();
            total_expenses += spent;
            *by_category.entry(tx.category_id.clone()).or_insert(0.0) += spent;

            let label = tx.date.format("%B").to_string();
            match monthly.iter_mut().find(|m| m.label == label) {
                Some(month) => month.total += spent,
                None => monthly.push(MonthTotal {
                    label,
                    total: spent,
                }),
            }
        }
        // Zero amounts contribute nothing and are not an error
    }

    let savings_rate = if total_income > 0.0 {
        Some((total_income - total_expenses) / total_income * 100.0)
    } else {
        None
    };

    Summary {
        total_income,
        total_expenses,
        by_category,
        savings_rate,
        monthly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;
    use chrono::{TimeZone, Utc};

    fn tx(amount: f64, category_id: &str, year: i32, month: u32) -> Transaction {
        Transaction {
            id: format!("txn-{}-{}-{}", category_id, year, month),
            amount,
            category_id: category_id.to_string(),
            description: String::new(),
            date: Utc.with_ymd_and_hms(year, month, 10, 0, 0, 0).unwrap(),
            payment_method: PaymentMethod::Card,
        }
    }

    #[test]
    fn test_totals() {
        let transactions = vec![
            tx(100.0, "income", 2024, 3),
            tx(-30.0, "food", 2024, 3),
            tx(-20.0, "transport", 2024, 3),
        ];
        let summary = aggregate(&transactions);

        assert_eq!(summary.total_income, 100.0);
        assert_eq!(summary.total_expenses, 50.0);
        assert_eq!(summary.surplus(), 50.0);
    }

    #[test]
    fn test_by_category_debits_only() {
        let transactions = vec![
            tx(100.0, "income", 2024, 3),
            tx(-30.0, "food", 2024, 3),
            tx(-20.0, "food", 2024, 3),
            tx(-20.0, "transport", 2024, 3),
        ];
        let summary = aggregate(&transactions);

        assert_eq!(summary.spent("food"), 50.0);
        assert_eq!(summary.spent("transport"), 20.0);
        // No entry at all for categories without debits
        assert!(!summary.by_category.contains_key("income"));
        assert!(!summary.by_category.contains_key("travel"));
        assert_eq!(summary.spent("travel"), 0.0);
    }

    #[test]
    fn test_savings_rate_defined() {
        let summary = aggregate(&[tx(200.0, "income", 2024, 1), tx(-50.0, "food", 2024, 1)]);
        assert_eq!(summary.savings_rate, Some(75.0));
    }

    #[test]
    fn test_savings_rate_absent_without_income() {
        let summary = aggregate(&[tx(-50.0, "food", 2024, 1)]);
        assert_eq!(summary.savings_rate, None);

        let summary = aggregate(&[]);
        assert_eq!(summary.savings_rate, None);
    }

    #[test]
    fn test_monthly_first_occurrence_order() {
        let transactions = vec![
            tx(-10.0, "food", 2024, 2),
            tx(-20.0, "food", 2024, 3),
            tx(-5.0, "food", 2024, 2),
        ];
        let summary = aggregate(&transactions);

        assert_eq!(summary.monthly.len(), 2);
        assert_eq!(summary.monthly[0].label, "February");
        assert_eq!(summary.monthly[0].total, 15.0);
        assert_eq!(summary.monthly[1].label, "March");
        assert_eq!(summary.monthly[1].total, 20.0);
    }

    #[test]
    fn test_monthly_ignores_credits() {
        let summary = aggregate(&[tx(500.0, "income", 2024, 2), tx(-10.0, "food", 2024, 3)]);
        assert_eq!(summary.monthly.len(), 1);
        assert_eq!(summary.monthly[0].label, "March");
    }

    #[test]
    fn test_zero_amount_contributes_nothing() {
        let summary = aggregate(&[tx(0.0, "food", 2024, 2)]);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expenses, 0.0);
        assert!(summary.by_category.is_empty());
        assert!(summary.monthly.is_empty());
    }
}
