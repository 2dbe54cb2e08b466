//! Cash-flow advisor
//!
//! Emits the investment-opportunity call-out, the always-present income vs.
//! expenses overview, and the savings-rate analysis.

use super::engine::{AdviceContext, Advisor};
use super::types::{sources, Insight, Severity};

/// Surplus above this triggers the priority investment insight
const INVESTMENT_SURPLUS_THRESHOLD: f64 = 100.0;

pub struct CashFlowAdvisor;

impl Advisor for CashFlowAdvisor {
    fn name(&self) -> &'static str {
        "Cash Flow"
    }

    fn analyze(&self, ctx: &AdviceContext<'_>) -> Vec<Insight> {
        let summary = ctx.summary;
        let mut insights = Vec::new();

        let income = summary.total_income;
        let expenses = summary.total_expenses;
        let surplus = summary.surplus();

        if income > expenses && surplus > INVESTMENT_SURPLUS_THRESHOLD {
            insights.push(
                Insight::new(
                    "Investment Opportunity",
                    format!(
                        "You have ${:.2} in monthly savings. Consider:\n\
                         • Opening a high-yield savings account\n\
                         • Starting a retirement fund\n\
                         • Investing in index funds\n\
                         • Building an emergency fund",
                        surplus
                    ),
                    Severity::Info,
                )
                .with_priority()
                .with_source(sources::INVESTING),
            );
        }

        let position = if income > expenses {
            format!(
                "You're saving ${:.2} ({:.1}% of income)",
                surplus,
                surplus / income * 100.0
            )
        } else {
            format!("You're overspending by ${:.2}", expenses - income)
        };
        insights.push(
            Insight::new(
                "Financial Health Overview",
                format!(
                    "Your total income is ${:.2} and total expenses are ${:.2}. {}",
                    income, expenses, position
                ),
                if income > expenses {
                    Severity::Info
                } else {
                    Severity::Warning
                },
            )
            .with_source(sources::SAVINGS),
        );

        if let Some(rate) = summary.savings_rate {
            let (message, severity) = if rate >= 20.0 {
                (
                    "Excellent! You're following the 50/30/20 rule. Consider investing your \
                     savings for long-term growth.",
                    Severity::Info,
                )
            } else if rate >= 10.0 {
                (
                    "You're saving 10-20% of your income. Try to increase it to 20% for better \
                     financial security.",
                    Severity::Warning,
                )
            } else {
                (
                    "Consider reducing discretionary spending to increase your savings rate to \
                     at least 20%.",
                    Severity::Alert,
                )
            };
            insights.push(
                Insight::new("Savings Rate Analysis", message, severity)
                    .with_source(sources::BUDGETING),
            );
        }

        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Summary;
    use crate::catalog::Catalog;
    use crate::models::BudgetBook;
    use std::collections::HashMap;

    fn summary(income: f64, expenses: f64) -> Summary {
        Summary {
            total_income: income,
            total_expenses: expenses,
            by_category: HashMap::new(),
            savings_rate: if income > 0.0 {
                Some((income - expenses) / income * 100.0)
            } else {
                None
            },
            monthly: Vec::new(),
        }
    }

    fn analyze(summary: &Summary) -> Vec<Insight> {
        let catalog = Catalog::default_catalog();
        let budgets = BudgetBook::new();
        CashFlowAdvisor.analyze(&AdviceContext::new(summary, &catalog, &budgets))
    }

    #[test]
    fn test_overview_always_present() {
        let insights = analyze(&summary(0.0, 75.0));
        assert!(insights
            .iter()
            .any(|i| i.title == "Financial Health Overview"));
    }

    #[test]
    fn test_overview_deficit_message() {
        let insights = analyze(&summary(100.0, 180.0));
        let overview = insights
            .iter()
            .find(|i| i.title == "Financial Health Overview")
            .unwrap();
        assert!(overview.message.contains("overspending by $80.00"));
        assert_eq!(overview.severity, Severity::Warning);
    }

    #[test]
    fn test_investment_opportunity_needs_surplus_over_threshold() {
        // Surplus of exactly 100 is not enough
        let insights = analyze(&summary(200.0, 100.0));
        assert!(!insights.iter().any(|i| i.title == "Investment Opportunity"));

        let insights = analyze(&summary(300.0, 100.0));
        let investment = insights
            .iter()
            .find(|i| i.title == "Investment Opportunity")
            .unwrap();
        assert!(investment.priority);
        assert!(investment.message.contains("$200.00"));
    }

    #[test]
    fn test_savings_rate_banding() {
        // 25% -> info
        let insights = analyze(&summary(1000.0, 750.0));
        let rate = insights
            .iter()
            .find(|i| i.title == "Savings Rate Analysis")
            .unwrap();
        assert_eq!(rate.severity, Severity::Info);

        // 15% -> warning
        let insights = analyze(&summary(1000.0, 850.0));
        let rate = insights
            .iter()
            .find(|i| i.title == "Savings Rate Analysis")
            .unwrap();
        assert_eq!(rate.severity, Severity::Warning);

        // 5% -> alert
        let insights = analyze(&summary(1000.0, 950.0));
        let rate = insights
            .iter()
            .find(|i| i.title == "Savings Rate Analysis")
            .unwrap();
        assert_eq!(rate.severity, Severity::Alert);
    }

    #[test]
    fn test_no_savings_rate_without_income() {
        // No income: the savings-rate insight is absent and no NaN leaks
        // into any message.
        let insights = analyze(&summary(0.0, 500.0));
        assert!(!insights.iter().any(|i| i.title == "Savings Rate Analysis"));
        for insight in &insights {
            assert!(!insight.message.contains("NaN"));
            assert!(!insight.message.contains("inf"));
        }
    }
}
