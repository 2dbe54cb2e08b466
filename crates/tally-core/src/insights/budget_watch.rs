//! Budget-watch advisor
//!
//! Per-category budget threshold checks (exceeded / approaching) plus the
//! fixed food and transport savings call-outs. Categories are walked in
//! catalog order so output ordering never depends on map iteration.

use super::engine::{AdviceContext, Advisor};
use super::types::{sources, Insight, Severity};

/// Fraction of budget that triggers the approaching-limit warning
const APPROACHING_LIMIT: f64 = 0.8;

const FOOD_CALLOUT_THRESHOLD: f64 = 200.0;
const TRANSPORT_CALLOUT_THRESHOLD: f64 = 100.0;

pub struct BudgetWatchAdvisor;

impl Advisor for BudgetWatchAdvisor {
    fn name(&self) -> &'static str {
        "Budget Watch"
    }

    fn analyze(&self, ctx: &AdviceContext<'_>) -> Vec<Insight> {
        let summary = ctx.summary;
        let mut insights = Vec::new();

        for category in ctx.catalog.iter() {
            let spent = summary.spent(&category.id);
            if spent <= 0.0 {
                continue;
            }
            let budget = ctx.budgets.amount_for(&category.id);
            if budget <= 0.0 {
                continue;
            }

            if spent > budget {
                insights.push(
                    Insight::new(
                        format!("Budget Alert: {}", category.name),
                        format!(
                            "You've exceeded your {} budget by ${:.2}. {}",
                            category.name,
                            spent - budget,
                            overspend_tip(&category.id)
                        ),
                        Severity::Alert,
                    )
                    .with_source(overspend_source(&category.id)),
                );
            } else if spent > APPROACHING_LIMIT * budget {
                insights.push(
                    Insight::new(
                        format!("Approaching Budget Limit: {}", category.name),
                        format!(
                            "You've used {:.1}% of your {} budget. Consider reviewing your \
                             spending to stay within limits.",
                            spent / budget * 100.0,
                            category.name
                        ),
                        Severity::Warning,
                    )
                    .with_source(sources::BUDGETING),
                );
            }
        }

        let food_spend = summary.spent("food");
        if food_spend > FOOD_CALLOUT_THRESHOLD {
            insights.push(
                Insight::new(
                    "Food & Dining Savings",
                    format!(
                        "You've spent ${:.2} on food. Consider:\n\
                         • Meal prepping for the week\n\
                         • Using grocery delivery services for better deals\n\
                         • Taking advantage of restaurant loyalty programs\n\
                         • Cooking at home more often",
                        food_spend
                    ),
                    Severity::Info,
                )
                .with_source(sources::FOOD_SAVINGS),
            );
        }

        let transport_spend = summary.spent("transport");
        if transport_spend > TRANSPORT_CALLOUT_THRESHOLD {
            insights.push(
                Insight::new(
                    "Transportation Savings",
                    format!(
                        "You've spent ${:.2} on transport. Consider:\n\
                         • Using public transport or carpooling\n\
                         • Maintaining your vehicle regularly to prevent costly repairs\n\
                         • Using fuel rewards programs\n\
                         • Walking or cycling for short distances",
                        transport_spend
                    ),
                    Severity::Info,
                )
                .with_source(sources::TRANSPORT_SAVINGS),
            );
        }

        insights
    }
}

fn overspend_tip(category_id: &str) -> &'static str {
    match category_id {
        "food" => "Consider meal planning and cooking at home to reduce expenses.",
        "transport" => "Look into carpooling or public transport options to save on commuting costs.",
        "entertainment" => {
            "Try free or low-cost entertainment options like local events or streaming services."
        }
        "shopping" => "Wait for sales or use cashback apps for better deals.",
        _ => "Review your spending in this category and identify non-essential expenses.",
    }
}

fn overspend_source(category_id: &str) -> &'static str {
    match category_id {
        "food" => sources::FOOD_SAVINGS,
        "transport" => sources::TRANSPORT_SAVINGS,
        _ => sources::BUDGETING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Summary;
    use crate::catalog::Catalog;
    use crate::models::BudgetBook;
    use std::collections::HashMap;

    fn summary_with(spent: &[(&str, f64)]) -> Summary {
        let by_category: HashMap<String, f64> = spent
            .iter()
            .map(|(id, amount)| (id.to_string(), *amount))
            .collect();
        let total_expenses = by_category.values().sum();
        Summary {
            total_income: 0.0,
            total_expenses,
            by_category,
            savings_rate: None,
            monthly: Vec::new(),
        }
    }

    fn analyze(summary: &Summary, budgets: &BudgetBook) -> Vec<Insight> {
        let catalog = Catalog::default_catalog();
        BudgetWatchAdvisor.analyze(&AdviceContext::new(summary, &catalog, budgets))
    }

    #[test]
    fn test_exceeded_budget_alert() {
        let mut budgets = BudgetBook::new();
        budgets.upsert("health", 100.0);

        let insights = analyze(&summary_with(&[("health", 150.0)]), &budgets);
        let alert = insights
            .iter()
            .find(|i| i.title == "Budget Alert: Healthcare")
            .unwrap();
        assert_eq!(alert.severity, Severity::Alert);
        assert!(alert.message.contains("$50.00"));
    }

    #[test]
    fn test_approaching_limit_warning() {
        let mut budgets = BudgetBook::new();
        budgets.upsert("entertainment", 100.0);

        // 85% of budget: warning, not alert
        let insights = analyze(&summary_with(&[("entertainment", 85.0)]), &budgets);
        let warning = insights
            .iter()
            .find(|i| i.title == "Approaching Budget Limit: Entertainment")
            .unwrap();
        assert_eq!(warning.severity, Severity::Warning);
        assert!(warning.message.contains("85.0%"));
    }

    #[test]
    fn test_under_threshold_is_quiet() {
        let mut budgets = BudgetBook::new();
        budgets.upsert("education", 100.0);

        let insights = analyze(&summary_with(&[("education", 50.0)]), &budgets);
        assert!(insights.is_empty());
    }

    #[test]
    fn test_zero_budget_categories_skipped() {
        // Spending without a budget produces no threshold insight
        let insights = analyze(&summary_with(&[("travel", 999.0)]), &BudgetBook::new());
        assert!(insights.iter().all(|i| !i.title.starts_with("Budget Alert")));
    }

    #[test]
    fn test_food_and_transport_callouts() {
        let budgets = BudgetBook::new();
        let insights = analyze(
            &summary_with(&[("food", 250.0), ("transport", 150.0)]),
            &budgets,
        );

        assert!(insights.iter().any(|i| i.title == "Food & Dining Savings"));
        assert!(insights.iter().any(|i| i.title == "Transportation Savings"));

        // At or below the fixed thresholds stays quiet
        let insights = analyze(
            &summary_with(&[("food", 200.0), ("transport", 100.0)]),
            &budgets,
        );
        assert!(insights.is_empty());
    }

    #[test]
    fn test_category_specific_tips() {
        let mut budgets = BudgetBook::new();
        budgets.upsert("food", 10.0);
        budgets.upsert("shopping", 10.0);

        let insights = analyze(
            &summary_with(&[("food", 20.0), ("shopping", 20.0)]),
            &budgets,
        );

        let food = insights
            .iter()
            .find(|i| i.title == "Budget Alert: Food & Dining")
            .unwrap();
        assert!(food.message.contains("meal planning"));
        assert_eq!(food.source.as_deref(), Some(sources::FOOD_SAVINGS));

        let shopping = insights
            .iter()
            .find(|i| i.title == "Budget Alert: Shopping")
            .unwrap();
        assert!(shopping.message.contains("cashback"));
    }
}
