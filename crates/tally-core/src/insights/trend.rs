//! Spending-trend advisor
//!
//! Compares the two chronologically latest months of debit totals and
//! flags swings beyond a fixed percentage.

use super::engine::{AdviceContext, Advisor};
use super::types::{sources, Insight, Severity};

/// Absolute month-over-month change (percent) that triggers the insight
const TREND_THRESHOLD: f64 = 10.0;

pub struct TrendAdvisor;

impl Advisor for TrendAdvisor {
    fn name(&self) -> &'static str {
        "Spending Trend"
    }

    fn analyze(&self, ctx: &AdviceContext<'_>) -> Vec<Insight> {
        let monthly = &ctx.summary.monthly;
        if monthly.len() < 2 {
            return Vec::new();
        }

        // `monthly` is ordered by first occurrence, so the last two entries
        // are the latest months.
        let previous = &monthly[monthly.len() - 2];
        let current = &monthly[monthly.len() - 1];
        let change = (current.total - previous.total) / previous.total * 100.0;

        if change.abs() <= TREND_THRESHOLD {
            return Vec::new();
        }

        let (direction, advice, severity) = if change > 0.0 {
            (
                "increased",
                "Review your recent expenses to identify any unnecessary spending.",
                Severity::Alert,
            )
        } else {
            (
                "decreased",
                "Great job! Keep up the good work on managing your expenses.",
                Severity::Info,
            )
        };

        vec![Insight::new(
            "Monthly Spending Trend",
            format!(
                "Your spending has {} by {:.1}% compared to last month. {}",
                direction,
                change.abs(),
                advice
            ),
            severity,
        )
        .with_source(sources::BUDGETING)]
    }
}
