//! Insight engine - runs advisors in fixed order and orders their output

use crate::aggregate::Summary;
use crate::catalog::Catalog;
use crate::models::BudgetBook;

use super::advice::PersonalAdviceAdvisor;
use super::budget_watch::BudgetWatchAdvisor;
use super::cash_flow::CashFlowAdvisor;
use super::trend::TrendAdvisor;
use super::types::Insight;

/// Context provided to advisors
pub struct AdviceContext<'a> {
    pub summary: &'a Summary,
    pub catalog: &'a Catalog,
    pub budgets: &'a BudgetBook,
}

impl<'a> AdviceContext<'a> {
    pub fn new(summary: &'a Summary, catalog: &'a Catalog, budgets: &'a BudgetBook) -> Self {
        Self {
            summary,
            catalog,
            budgets,
        }
    }
}

/// Trait for insight advisors.
///
/// Advisors are pure projections over the context; they hold no state and
/// perform no IO, so the trait is synchronous.
pub trait Advisor: Send + Sync {
    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Analyze the context and produce insights, in emission order
    fn analyze(&self, ctx: &AdviceContext<'_>) -> Vec<Insight>;
}

/// The main insight engine
pub struct InsightEngine {
    advisors: Vec<Box<dyn Advisor>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in advisors.
    ///
    /// Registration order fixes the relative order of non-priority
    /// insights, so it is part of the output contract.
    pub fn new() -> Self {
        let mut engine = Self { advisors: vec![] };

        engine.register(Box::new(CashFlowAdvisor));
        engine.register(Box::new(BudgetWatchAdvisor));
        engine.register(Box::new(TrendAdvisor));
        engine.register(Box::new(PersonalAdviceAdvisor));

        engine
    }

    pub fn register(&mut self, advisor: Box<dyn Advisor>) {
        self.advisors.push(advisor);
    }

    /// Run all advisors and collect their insights.
    ///
    /// Priority insights sort first; within each group, emission order is
    /// preserved (stable sort). An empty summary yields an empty list.
    pub fn generate(&self, ctx: &AdviceContext<'_>) -> Vec<Insight> {
        if summary_is_empty(ctx.summary) {
            return Vec::new();
        }

        let mut insights = Vec::new();
        for advisor in &self.advisors {
            let produced = advisor.analyze(ctx);
            tracing::debug!(
                advisor = advisor.name(),
                count = produced.len(),
                "advisor analysis complete"
            );
            insights.extend(produced);
        }

        insights.sort_by_key(|insight| !insight.priority);
        insights
    }
}

fn summary_is_empty(summary: &Summary) -> bool {
    summary.total_income == 0.0 && summary.total_expenses == 0.0 && summary.by_category.is_empty()
}

/// Generate the advisory list for a summary
pub fn generate_insights(summary: &Summary, catalog: &Catalog, budgets: &BudgetBook) -> Vec<Insight> {
    InsightEngine::new().generate(&AdviceContext::new(summary, catalog, budgets))
}
