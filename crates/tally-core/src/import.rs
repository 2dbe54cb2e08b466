//! Offline statement import
//!
//! CSV and plain-text readers for statements the user already has on disk.
//! Rows are fed through the same statement normalization rules as
//! document-AI payloads, so sign handling, income tagging, and
//! classification behave identically whatever the source.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde_json::{json, Value};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::models::Transaction;
use crate::normalize::{DocumentKind, Normalizer};

const REQUIRED_COLUMNS: [&str; 3] = ["date", "amount", "description"];

/// Read a CSV statement with date, amount, and description columns
/// (case-insensitive header match, any order).
pub fn read_csv_statement(catalog: &Catalog, raw: &str) -> Result<Vec<Transaction>> {
    read_csv_statement_at(catalog, raw, Utc::now())
}

pub fn read_csv_statement_at(
    catalog: &Catalog,
    raw: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Transaction>> {
    let mut reader = csv::Reader::from_reader(raw.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
    };
    let (date_col, amount_col, description_col) =
        match (column("date"), column("amount"), column("description")) {
            (Some(d), Some(a), Some(c)) => (d, a, c),
            _ => {
                return Err(Error::Import(format!(
                    "CSV must contain columns: {}",
                    REQUIRED_COLUMNS.join(", ")
                )))
            }
        };

    let mut entries = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let date = record.get(date_col).unwrap_or("").trim();
        let description = record.get(description_col).unwrap_or("").trim();
        let amount = parse_amount(record.get(amount_col).unwrap_or("")).ok_or_else(|| {
            Error::Import(format!(
                "row {}: amount is not a number",
                // Header row is line 1
                row + 2
            ))
        })?;

        entries.push(json!({
            "date": date,
            "description": description,
            "amount": amount,
        }));
    }

    normalize_entries(catalog, entries, now)
}

/// Read a plain-text statement, one `date amount description` line per
/// transaction. Header and layout noise is skipped; only zero usable lines
/// is an error.
pub fn read_text_statement(catalog: &Catalog, raw: &str) -> Result<Vec<Transaction>> {
    read_text_statement_at(catalog, raw, Utc::now())
}

pub fn read_text_statement_at(
    catalog: &Catalog,
    raw: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Transaction>> {
    // Dates like 03/14/2024, 14-03-2024, or 2024-03-14
    let line_pattern = Regex::new(r"^(\d{1,4}[-/]\d{1,2}[-/]\d{2,4})\s+(-?[\d,.]+)\s+(.+)$")?;

    let mut entries = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || is_header_line(line) {
            continue;
        }
        let Some(captures) = line_pattern.captures(line) else {
            debug!(line, "skipping unrecognized statement line");
            continue;
        };

        let Some(amount) = parse_amount(&captures[2]) else {
            debug!(line, "skipping line with unparseable amount");
            continue;
        };

        let mut entry = json!({
            "description": captures[3].trim(),
            "amount": amount,
        });
        if let Some(date) = parse_flexible_date(&captures[1]) {
            entry["date"] = json!(date.format("%Y-%m-%d").to_string());
        }
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(Error::Import("no valid transactions found".into()));
    }
    normalize_entries(catalog, entries, now)
}

fn normalize_entries(
    catalog: &Catalog,
    entries: Vec<Value>,
    now: DateTime<Utc>,
) -> Result<Vec<Transaction>> {
    let payload = json!({ "transactions": entries });
    Normalizer::new(catalog).normalize_payload(&payload, DocumentKind::Statement, now)
}

fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    ["date", "transaction", "balance"]
        .iter()
        .any(|header| lower.contains(header))
}

/// Parse an amount, tolerating currency symbols and thousands separators
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
    cleaned.parse::<f64>().ok().filter(|a| a.is_finite())
}

/// Try the date layouts banks actually emit
fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 5] = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d-%m-%Y", "%d-%m-%y"];
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}
