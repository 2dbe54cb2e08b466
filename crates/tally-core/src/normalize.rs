//! Document normalizer
//!
//! Turns the raw text a document-AI backend returns into validated
//! transactions. Models often wrap their JSON in markdown fences or prose,
//! so the payload is cleaned and extracted before shape inspection. The
//! normalizer performs no network calls; it consumes whatever text the
//! external collaborator produced.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::catalog::{Catalog, INCOME_CATEGORY};
use crate::classify::classify;
use crate::error::{Error, Result};
use crate::models::{PaymentMethod, Transaction};

/// What kind of document the payload was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Single purchase: `{ amount, merchant, category? }`
    Receipt,
    /// Multi-transaction statement: `{ transactions: [...] }`
    Statement,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Receipt => "receipt",
            Self::Statement => "statement",
        }
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "receipt" => Ok(Self::Receipt),
            "statement" => Ok(Self::Statement),
            _ => Err(format!("Unknown document kind: {}", s)),
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalizes document-AI payloads into transactions
pub struct Normalizer<'a> {
    catalog: &'a Catalog,
}

impl<'a> Normalizer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Normalize a raw payload, stamping fallback dates with the current time
    pub fn normalize(&self, raw: &str, kind: DocumentKind) -> Result<Vec<Transaction>> {
        self.normalize_at(raw, kind, Utc::now())
    }

    /// Normalize with an explicit processing time.
    ///
    /// Receipts and entries without a usable date are stamped with `now`,
    /// which also seeds the generated transaction ids.
    pub fn normalize_at(
        &self,
        raw: &str,
        kind: DocumentKind,
        now: DateTime<Utc>,
    ) -> Result<Vec<Transaction>> {
        let payload = parse_payload(raw)?;
        self.normalize_payload(&payload, kind, now)
    }

    /// Normalize an already-parsed payload. The offline importers feed
    /// their rows through here so every source obeys the same rules.
    pub fn normalize_payload(
        &self,
        payload: &Value,
        kind: DocumentKind,
        now: DateTime<Utc>,
    ) -> Result<Vec<Transaction>> {
        let object = payload
            .as_object()
            .ok_or_else(|| Error::UnsupportedInput("payload is not a JSON object".into()))?;

        match kind {
            DocumentKind::Receipt => self.normalize_receipt(object, now).map(|tx| vec![tx]),
            DocumentKind::Statement => self.normalize_statement(object, now),
        }
    }

    fn normalize_receipt(
        &self,
        object: &serde_json::Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<Transaction> {
        let amount = object.get("amount").and_then(Value::as_f64);
        let merchant = object
            .get("merchant")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty());

        let (amount, merchant) = match (amount, merchant) {
            (Some(amount), Some(merchant)) => (amount, merchant),
            _ => {
                return Err(Error::MalformedResponse(
                    "missing amount or merchant".into(),
                ))
            }
        };
        validate_amount(amount, merchant)?;

        // A category the source supplies wins when it resolves against the
        // catalog; anything else goes through the keyword table.
        let category_id = object
            .get("category")
            .and_then(Value::as_str)
            .and_then(|c| self.catalog.resolve(c))
            .unwrap_or_else(|| classify(merchant))
            .to_string();

        debug!(merchant, amount, category = %category_id, "normalized receipt");

        Ok(Transaction {
            id: transaction_id(now, 0),
            // Receipts are always purchases
            amount: -amount.abs(),
            category_id,
            description: merchant.to_string(),
            date: now,
            payment_method: PaymentMethod::Card,
        })
    }

    fn normalize_statement(
        &self,
        object: &serde_json::Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Transaction>> {
        let entries = object
            .get("transactions")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::MalformedResponse("transactions is not an array".into()))?;

        let mut transactions = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            transactions.push(self.normalize_entry(entry, index, now)?);
        }

        debug!(count = transactions.len(), "normalized statement");
        Ok(transactions)
    }

    /// Normalize one statement entry. Any validation failure rejects the
    /// whole batch; partial silent data loss is worse than a visible error.
    fn normalize_entry(
        &self,
        entry: &Value,
        index: usize,
        now: DateTime<Utc>,
    ) -> Result<Transaction> {
        let object = entry.as_object().ok_or_else(|| {
            Error::InvalidTransaction(format!("entry {}: not an object", index + 1))
        })?;

        let description = object
            .get("description")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                Error::InvalidTransaction(format!("entry {}: missing description", index + 1))
            })?;

        let amount = object.get("amount").and_then(Value::as_f64).ok_or_else(|| {
            Error::InvalidTransaction(format!(
                "entry {} ({}): amount is not a number",
                index + 1,
                description
            ))
        })?;
        validate_amount(amount, description)?;

        // Credits keep their sign and are tagged as income; everything else
        // is normalized to a negative debit and classified by description.
        let (amount, category_id) = if amount > 0.0 {
            (amount, INCOME_CATEGORY.to_string())
        } else {
            (-amount.abs(), classify(description).to_string())
        };

        let date = match object.get("date").and_then(Value::as_str) {
            Some(raw) => parse_iso_date(raw).unwrap_or_else(|| {
                debug!(entry = index + 1, raw, "unparseable date, using processing time");
                now
            }),
            None => now,
        };

        Ok(Transaction {
            id: transaction_id(now, index),
            amount,
            category_id,
            description: description.to_string(),
            date,
            payment_method: PaymentMethod::Bank,
        })
    }
}

/// Strip markdown fences and extract the JSON object from a model response
fn parse_payload(raw: &str) -> Result<Value> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    if let Ok(value) = serde_json::from_str(cleaned) {
        return Ok(value);
    }

    // Models sometimes wrap the payload in prose; take the outermost braces.
    let start = cleaned.find('{');
    let end = cleaned.rfind('}');
    if let (Some(start), Some(end)) = (start, end) {
        if start < end {
            if let Ok(value) = serde_json::from_str(&cleaned[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(Error::MalformedResponse("invalid JSON".into()))
}

fn validate_amount(amount: f64, label: &str) -> Result<()> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidTransaction(format!(
            "{}: amount is not a finite number",
            label
        )))
    }
}

/// Parse an ISO-8601 date or datetime string
fn parse_iso_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn transaction_id(now: DateTime<Utc>, index: usize) -> String {
    format!("txn-{}-{}", now.timestamp_millis(), index)
}
