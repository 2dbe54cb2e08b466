//! Insight generation
//!
//! Pure advisory projection over aggregated transaction data. Advisors run
//! in a fixed order and priority insights sort to the front; identical
//! inputs always produce identical output.

mod advice;
mod budget_watch;
mod cash_flow;
mod engine;
mod trend;
mod types;

pub use advice::PersonalAdviceAdvisor;
pub use budget_watch::BudgetWatchAdvisor;
pub use cash_flow::CashFlowAdvisor;
pub use engine::{generate_insights, AdviceContext, Advisor, InsightEngine};
pub use trend::TrendAdvisor;
pub use types::{sources, AdviceTip, Insight, Severity};
