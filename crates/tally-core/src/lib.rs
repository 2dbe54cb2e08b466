//! Tally Core Library
//!
//! Shared functionality for the tally personal finance tracker:
//! - Category catalog and keyword-based expense classification
//! - Document normalizer turning document-AI payloads into transactions
//! - Offline CSV/text statement importers
//! - Aggregation engine for totals, savings rate, and monthly spend
//! - Insight engine producing ordered advisory messages
//! - Pluggable document-AI backends (Gemini, mock)

pub mod aggregate;
pub mod ai;
pub mod catalog;
pub mod classify;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod normalize;

pub use aggregate::{aggregate, MonthTotal, Summary};
pub use ai::{DocumentAI, DocumentClient, GeminiBackend, MockBackend};
pub use catalog::{Catalog, INCOME_CATEGORY, OTHER_CATEGORY};
pub use classify::classify;
pub use error::{Error, Result};
pub use insights::{
    generate_insights, AdviceContext, AdviceTip, Advisor, Insight, InsightEngine, Severity,
};
pub use models::{Budget, BudgetBook, Category, PaymentMethod, Transaction};
pub use normalize::{DocumentKind, Normalizer};
