//! Personal-advice advisor
//!
//! Consolidates the individually-triggered tips into one priority insight.
//! Each tip carries its own reference link; when nothing triggers, the
//! insight is omitted entirely.

use super::engine::{AdviceContext, Advisor};
use super::types::{sources, AdviceTip, Insight, Severity};

/// Target savings rate (percent of income)
const TARGET_SAVINGS_RATE: f64 = 20.0;

/// Expenses above this fraction of income suggest a debt problem
const HIGH_EXPENSE_RATIO: f64 = 0.7;

pub struct PersonalAdviceAdvisor;

impl Advisor for PersonalAdviceAdvisor {
    fn name(&self) -> &'static str {
        "Personal Advice"
    }

    fn analyze(&self, ctx: &AdviceContext<'_>) -> Vec<Insight> {
        let summary = ctx.summary;
        let income = summary.total_income;
        let expenses = summary.total_expenses;
        let savings_rate = summary.savings_rate.unwrap_or(0.0);

        let over_budget: Vec<&str> = ctx
            .catalog
            .iter()
            .filter(|category| {
                let budget = ctx.budgets.amount_for(&category.id);
                budget > 0.0 && summary.spent(&category.id) > budget
            })
            .map(|category| category.name.as_str())
            .collect();

        let mut advice = Vec::new();

        if savings_rate < TARGET_SAVINGS_RATE {
            advice.push(tip(
                "Increase Your Savings",
                "Try to save at least 20% of your income. Consider automating your savings by \
                 setting up automatic transfers to a savings account.",
                sources::SAVINGS,
            ));
        }

        if income > 0.0 {
            advice.push(tip(
                "Build Emergency Fund",
                "Aim to save 3-6 months of living expenses in an easily accessible emergency fund.",
                sources::EMERGENCY_FUND,
            ));
        }

        if !over_budget.is_empty() {
            advice.push(tip(
                "Budget Management",
                format!(
                    "You're over budget in {}. Review these categories and look for ways to \
                     reduce spending.",
                    over_budget.join(", ")
                ),
                sources::BUDGETING,
            ));
        }

        if savings_rate > TARGET_SAVINGS_RATE {
            advice.push(tip(
                "Investment Opportunities",
                "Consider investing your extra savings in a diversified portfolio. Look into \
                 index funds or retirement accounts for long-term growth.",
                sources::INVESTING,
            ));
        }

        if expenses > income * HIGH_EXPENSE_RATIO {
            advice.push(tip(
                "Debt Management",
                "Your expenses are high relative to income. Consider debt consolidation or \
                 creating a debt repayment plan.",
                sources::DEBT_MANAGEMENT,
            ));
        }

        if income > expenses {
            advice.push(tip(
                "Retirement Planning",
                "Make sure you're contributing to retirement accounts. Consider increasing \
                 contributions if you're saving more than 20% of income.",
                sources::RETIREMENT,
            ));
        }

        if advice.is_empty() {
            return Vec::new();
        }

        vec![Insight::new(
            "Your Personal Finance Advisor",
            "Based on your spending patterns and financial goals, here are some personalized \
             recommendations:",
            Severity::Info,
        )
        .with_priority()
        .with_advice(advice)]
    }
}

fn tip(title: &str, text: impl Into<String>, source: &str) -> AdviceTip {
    AdviceTip {
        title: title.to_string(),
        tip: text.into(),
        source: source.to_string(),
    }
}
