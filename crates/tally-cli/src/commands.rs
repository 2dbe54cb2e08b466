//! Command implementations
//!
//! Each command loads the ledger, runs the relevant core pipeline pieces,
//! and saves back when it changed anything.

use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, NaiveTime, Utc};

use tally_core::{
    aggregate, classify, generate_insights, Catalog, DocumentAI, DocumentClient, DocumentKind,
    Insight, Normalizer, PaymentMethod, Transaction, INCOME_CATEGORY,
};

use crate::store::Ledger;

pub async fn cmd_scan(
    ledger_path: &Path,
    catalog: &Catalog,
    file: &Path,
    kind: &str,
    mock: bool,
) -> Result<()> {
    let kind = DocumentKind::from_str(kind).map_err(|e| anyhow!(e))?;
    let data = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let mime_type = mime_type_for(file)?;

    let client = if mock {
        DocumentClient::mock()
    } else {
        DocumentClient::from_env()
            .context("no document-AI backend configured (set GEMINI_API_KEY, or pass --mock)")?
    };

    println!(
        "📄 Scanning {} as {} via {}...",
        file.display(),
        kind,
        client.model()
    );

    let raw = client.extract(&data, mime_type, kind).await?;
    tracing::debug!(chars = raw.len(), "document-AI response received");
    let transactions = Normalizer::new(catalog).normalize(&raw, kind)?;

    let mut ledger = Ledger::load_or_init(ledger_path, catalog)?;
    report_added(&transactions, catalog);
    ledger.transactions.extend(transactions);
    ledger.save(ledger_path)?;

    Ok(())
}

pub fn cmd_import(ledger_path: &Path, catalog: &Catalog, file: &Path, format: &str) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    tracing::debug!(format, bytes = raw.len(), "importing statement");
    let transactions = match format {
        "csv" => tally_core::import::read_csv_statement(catalog, &raw)?,
        "text" => tally_core::import::read_text_statement(catalog, &raw)?,
        other => bail!("unknown import format: {} (expected csv or text)", other),
    };

    let mut ledger = Ledger::load_or_init(ledger_path, catalog)?;
    report_added(&transactions, catalog);
    ledger.transactions.extend(transactions);
    ledger.save(ledger_path)?;

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    ledger_path: &Path,
    catalog: &Catalog,
    amount: f64,
    category: Option<&str>,
    description: &str,
    method: &str,
    date: Option<&str>,
) -> Result<()> {
    if !amount.is_finite() {
        bail!("amount must be a finite number");
    }
    let payment_method = PaymentMethod::from_str(method).map_err(|e| anyhow!(e))?;

    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("invalid date {} (use YYYY-MM-DD)", raw))?
            .and_time(NaiveTime::MIN)
            .and_utc(),
        None => Utc::now(),
    };

    let category_id = match category {
        Some(id) => resolve_category(catalog, id)?,
        None if amount > 0.0 => INCOME_CATEGORY.to_string(),
        None => classify(description).to_string(),
    };

    let mut ledger = Ledger::load_or_init(ledger_path, catalog)?;
    let transaction = Transaction {
        // The list position keeps ids from colliding within one millisecond
        id: format!(
            "txn-{}-{}",
            Utc::now().timestamp_millis(),
            ledger.transactions.len()
        ),
        amount,
        category_id,
        description: description.to_string(),
        date,
        payment_method,
    };
    println!(
        "✅ Added ${:.2} to {}",
        transaction.amount.abs(),
        category_label(catalog, &transaction.category_id)
    );
    ledger.transactions.push(transaction);
    ledger.save(ledger_path)?;

    Ok(())
}

pub fn cmd_budget_list(ledger_path: &Path, catalog: &Catalog) -> Result<()> {
    let ledger = Ledger::load_or_init(ledger_path, catalog)?;
    let summary = aggregate(&ledger.transactions);

    println!("{:<16} {:>10} {:>10}", "CATEGORY", "BUDGET", "SPENT");
    for category in catalog.iter() {
        let budget = ledger.budgets.amount_for(&category.id);
        let spent = summary.spent(&category.id);
        let marker = if budget > 0.0 && spent > budget {
            "  ⚠ over budget"
        } else {
            ""
        };
        println!(
            "{:<16} {:>10.2} {:>10.2}{}",
            category.id, budget, spent, marker
        );
    }

    Ok(())
}

pub fn cmd_budget_set(
    ledger_path: &Path,
    catalog: &Catalog,
    category: &str,
    amount: f64,
) -> Result<()> {
    if !(amount.is_finite() && amount >= 0.0) {
        bail!("budget amount must be zero or positive");
    }
    let category_id = catalog
        .resolve(category)
        .ok_or_else(|| anyhow!("unknown category: {}", category))?
        .to_string();

    let mut ledger = Ledger::load_or_init(ledger_path, catalog)?;
    ledger.budgets.upsert(category_id.clone(), amount);
    ledger.save(ledger_path)?;

    println!(
        "✅ Budget for {} set to ${:.2}",
        catalog.name_of(&category_id),
        amount
    );
    Ok(())
}

pub fn cmd_summary(ledger_path: &Path, catalog: &Catalog, json: bool) -> Result<()> {
    let ledger = Ledger::load_or_init(ledger_path, catalog)?;
    let summary = aggregate(&ledger.transactions);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("💰 Income:   ${:.2}", summary.total_income);
    println!("💸 Expenses: ${:.2}", summary.total_expenses);
    match summary.savings_rate {
        Some(rate) => println!("📈 Savings rate: {:.1}%", rate),
        None => println!("📈 Savings rate: n/a (no income recorded)"),
    }

    if !summary.by_category.is_empty() {
        println!();
        println!("By category:");
        for category in catalog.iter() {
            let spent = summary.spent(&category.id);
            if spent > 0.0 {
                println!("  {:<16} ${:.2}", category.name, spent);
            }
        }
    }

    if !summary.monthly.is_empty() {
        println!();
        println!("By month:");
        for month in &summary.monthly {
            println!("  {:<12} ${:.2}", month.label, month.total);
        }
    }

    Ok(())
}

pub fn cmd_insights(ledger_path: &Path, catalog: &Catalog, json: bool) -> Result<()> {
    let ledger = Ledger::load_or_init(ledger_path, catalog)?;
    let summary = aggregate(&ledger.transactions);
    let insights = generate_insights(&summary, catalog, &ledger.budgets);

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    if insights.is_empty() {
        println!("No insights yet. Add transactions with `tally add` or `tally scan`.");
        return Ok(());
    }

    for insight in &insights {
        print_insight(insight);
    }
    Ok(())
}

pub fn cmd_categories(catalog: &Catalog) -> Result<()> {
    println!("{:<16} {:<20} {:>14}", "ID", "NAME", "DEFAULT BUDGET");
    for category in catalog.iter() {
        println!(
            "{:<16} {:<20} {:>14.2}",
            category.id, category.name, category.default_budget
        );
    }
    Ok(())
}

pub fn cmd_recategorize(
    ledger_path: &Path,
    catalog: &Catalog,
    id: &str,
    category: &str,
) -> Result<()> {
    let category_id = resolve_category(catalog, category)?;

    let mut ledger = Ledger::load_or_init(ledger_path, catalog)?;
    let transaction = ledger
        .transactions
        .iter_mut()
        .find(|tx| tx.id == id)
        .ok_or_else(|| anyhow!("no transaction with id {}", id))?;

    transaction.recategorize(category_id.clone());
    ledger.save(ledger_path)?;

    println!("✅ Moved {} to {}", id, category_label(catalog, &category_id));
    Ok(())
}

/// Resolve a user-supplied category reference, allowing the income sentinel
fn resolve_category(catalog: &Catalog, reference: &str) -> Result<String> {
    if reference.eq_ignore_ascii_case(INCOME_CATEGORY) {
        return Ok(INCOME_CATEGORY.to_string());
    }
    catalog
        .resolve(reference)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("unknown category: {}", reference))
}

fn category_label<'a>(catalog: &'a Catalog, category_id: &'a str) -> &'a str {
    if category_id == INCOME_CATEGORY {
        "Income"
    } else {
        catalog.name_of(category_id)
    }
}

fn report_added(transactions: &[Transaction], catalog: &Catalog) {
    for tx in transactions {
        println!(
            "  {} {:<30} ${:>9.2}  [{}]",
            tx.date.format("%Y-%m-%d"),
            truncate(&tx.description, 30),
            tx.amount,
            category_label(catalog, &tx.category_id)
        );
    }
    println!("✅ Added {} transaction(s)", transactions.len());
}

/// Truncate a string to a maximum length, adding "..." if truncated.
fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}

fn print_insight(insight: &Insight) {
    let tag = match (insight.priority, insight.severity) {
        (true, _) => "★",
        (false, tally_core::Severity::Alert) => "‼",
        (false, tally_core::Severity::Warning) => "⚠",
        (false, tally_core::Severity::Info) => "ℹ",
    };
    println!("{} {} [{}]", tag, insight.title, insight.severity);
    for line in insight.message.lines() {
        println!("   {}", line.trim());
    }
    for tip in &insight.advice {
        println!("   • {}: {}", tip.title, tip.tip);
        println!("     {}", tip.source);
    }
    if let Some(ref source) = insight.source {
        println!("   → {}", source);
    }
    println!();
}

fn mime_type_for(file: &Path) -> Result<&'static str> {
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "webp" => Ok("image/webp"),
        "heic" => Ok("image/heic"),
        "heif" => Ok("image/heif"),
        "pdf" => Ok("application/pdf"),
        other => bail!(
            "unsupported file extension: {:?} (expected jpg, png, webp, heic, heif, or pdf)",
            other
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_for_known_extensions() {
        assert_eq!(
            mime_type_for(Path::new("receipt.JPG")).unwrap(),
            "image/jpeg"
        );
        assert_eq!(
            mime_type_for(Path::new("statement.pdf")).unwrap(),
            "application/pdf"
        );
        assert!(mime_type_for(Path::new("notes.txt")).is_err());
    }

    #[test]
    fn test_add_then_summary_flow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let catalog = Catalog::default_catalog();

        cmd_add(
            &path,
            &catalog,
            -42.0,
            None,
            "starbucks downtown",
            "card",
            Some("2024-03-10"),
        )
        .unwrap();
        cmd_add(&path, &catalog, 2500.0, None, "march salary", "bank", None).unwrap();

        let ledger = Ledger::load_or_init(&path, &catalog).unwrap();
        assert_eq!(ledger.transactions.len(), 2);
        // Classified from the description
        assert_eq!(ledger.transactions[0].category_id, "food");
        // Positive with no explicit category tags income
        assert_eq!(ledger.transactions[1].category_id, "income");

        let summary = aggregate(&ledger.transactions);
        assert_eq!(summary.total_expenses, 42.0);
        assert_eq!(summary.total_income, 2500.0);
    }

    #[test]
    fn test_recategorize_flow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let catalog = Catalog::default_catalog();

        cmd_add(
            &path,
            &catalog,
            -10.0,
            None,
            "mystery merchant",
            "cash",
            Some("2024-03-10"),
        )
        .unwrap();
        let ledger = Ledger::load_or_init(&path, &catalog).unwrap();
        let id = ledger.transactions[0].id.clone();
        assert_eq!(ledger.transactions[0].category_id, "other");

        cmd_recategorize(&path, &catalog, &id, "entertainment").unwrap();
        let ledger = Ledger::load_or_init(&path, &catalog).unwrap();
        assert_eq!(ledger.transactions[0].category_id, "entertainment");

        assert!(cmd_recategorize(&path, &catalog, "txn-missing", "food").is_err());
    }

    #[test]
    fn test_budget_set_rejects_unknown_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let catalog = Catalog::default_catalog();

        assert!(cmd_budget_set(&path, &catalog, "crypto", 100.0).is_err());
        assert!(cmd_budget_set(&path, &catalog, "food", -5.0).is_err());
        cmd_budget_set(&path, &catalog, "Food & Dining", 640.0).unwrap();

        let ledger = Ledger::load_or_init(&path, &catalog).unwrap();
        assert_eq!(ledger.budgets.amount_for("food"), 640.0);
    }
}
