//! Core types for the insight engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reference links attached to advisory messages
pub mod sources {
    pub const SAVINGS: &str =
        "https://www.investopedia.com/articles/personal-finance/100516/importance-saving-money/";
    pub const INVESTING: &str = "https://www.nerdwallet.com/article/investing/how-to-start-investing";
    pub const BUDGETING: &str = "https://www.mint.com/budgeting-3/50-30-20-budget-rule";
    pub const FOOD_SAVINGS: &str =
        "https://www.consumer.gov/articles/1002-making-food-dollars-stretch";
    pub const TRANSPORT_SAVINGS: &str =
        "https://www.consumer.gov/articles/1002-saving-money-on-transportation";
    pub const EMERGENCY_FUND: &str =
        "https://www.nerdwallet.com/article/banking/emergency-fund-how-much-to-build";
    pub const DEBT_MANAGEMENT: &str =
        "https://www.nerdwallet.com/article/finance/debt-management-strategies";
    pub const RETIREMENT: &str = "https://www.investopedia.com/retirement-planning-4689695";
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational or positive
    Info,
    /// Worth attention
    Warning,
    /// Should be addressed
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Alert => "alert",
        }
    }

    /// Numeric rank for display (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Alert => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "alert" => Ok(Severity::Alert),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// One tip inside the consolidated advice insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceTip {
    pub title: String,
    pub tip: String,
    /// Reference link backing the tip
    pub source: String,
}

/// A generated advisory message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    /// Priority insights sort before the rest
    pub priority: bool,
    /// Optional reference link
    pub source: Option<String>,
    /// Sub-tips, only populated on the consolidated advice insight
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advice: Vec<AdviceTip>,
}

impl Insight {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
            priority: false,
            source: None,
            advice: Vec::new(),
        }
    }

    pub fn with_priority(mut self) -> Self {
        self.priority = true;
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    pub fn with_advice(mut self, advice: Vec<AdviceTip>) -> Self {
        self.advice = advice;
        self
    }
}
