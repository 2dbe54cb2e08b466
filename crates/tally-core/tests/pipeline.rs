//! Integration tests for tally-core
//!
//! These tests exercise the full extract → normalize → aggregate → insights
//! pipeline using the mock document-AI backend.

use chrono::{TimeZone, Utc};

use tally_core::{
    aggregate, generate_insights, BudgetBook, Catalog, DocumentAI, DocumentKind, MockBackend,
    Normalizer, PaymentMethod, Severity,
};

/// A statement payload the way a model would actually hand it back:
/// fenced, with a credit, recurring debits, and one date missing.
fn statement_payload() -> &'static str {
    r#"```json
{
  "transactions": [
    {"date": "2024-02-01", "description": "ACME CORP SALARY", "amount": 2600.00},
    {"date": "2024-02-03", "description": "WHOLE FOODS MARKET", "amount": -220.40},
    {"date": "2024-02-10", "description": "NETFLIX.COM", "amount": -15.49},
    {"date": "2024-03-01", "description": "ACME CORP SALARY", "amount": 2600.00},
    {"date": "2024-03-04", "description": "UBER *TRIP HELP.UBER.COM", "amount": -48.20},
    {"date": "2024-03-07", "description": "STARBUCKS STORE 0921", "amount": -180.10},
    {"description": "monthly rent", "amount": -1200.00}
  ]
}
```"#
}

#[test]
fn test_statement_to_insights_pipeline() {
    let catalog = Catalog::default_catalog();
    let now = Utc.with_ymd_and_hms(2024, 3, 20, 8, 0, 0).unwrap();

    let transactions = Normalizer::new(&catalog)
        .normalize_at(statement_payload(), DocumentKind::Statement, now)
        .expect("statement should normalize");
    assert_eq!(transactions.len(), 7);

    // Credits tagged income, debits classified, dateless entry stamped now
    assert_eq!(transactions[0].category_id, "income");
    assert_eq!(transactions[1].category_id, "shopping");
    assert_eq!(transactions[2].category_id, "entertainment");
    assert_eq!(transactions[5].category_id, "food");
    assert_eq!(transactions[6].category_id, "utilities");
    assert_eq!(transactions[6].date, now);
    assert!(transactions
        .iter()
        .all(|tx| tx.payment_method == PaymentMethod::Bank));

    let summary = aggregate(&transactions);
    assert_eq!(summary.total_income, 5200.00);
    assert!((summary.total_expenses - 1664.19).abs() < 1e-9);
    // February first, then March (first-occurrence order)
    assert_eq!(summary.monthly[0].label, "February");
    assert_eq!(summary.monthly[1].label, "March");

    let budgets = catalog.default_budgets();
    let insights = generate_insights(&summary, &catalog, &budgets);
    assert!(!insights.is_empty());

    // Healthy surplus: the priority investment call-out leads
    assert!(insights[0].priority);
    assert!(insights
        .iter()
        .any(|i| i.title == "Financial Health Overview"));

    // March spend (1428.30) is well above February's (235.89)
    let trend = insights
        .iter()
        .find(|i| i.title == "Monthly Spending Trend")
        .expect("trend insight");
    assert_eq!(trend.severity, Severity::Alert);
    assert!(trend.message.contains("increased"));
}

#[tokio::test]
async fn test_mock_receipt_end_to_end() {
    let catalog = Catalog::default_catalog();
    let backend = MockBackend::new();

    let raw = backend
        .extract(b"receipt bytes", "image/jpeg", DocumentKind::Receipt)
        .await
        .expect("mock extraction");

    let transactions = Normalizer::new(&catalog)
        .normalize(&raw, DocumentKind::Receipt)
        .expect("receipt should normalize");

    assert_eq!(transactions.len(), 1);
    let tx = &transactions[0];
    assert!(tx.amount < 0.0);
    assert_eq!(tx.payment_method, PaymentMethod::Card);
    assert!(catalog.get(&tx.category_id).is_some());
}

#[test]
fn test_budget_exceeded_end_to_end() {
    // Food budget 100, one food debit of 150 this month
    let catalog = Catalog::default_catalog();
    let mut budgets = BudgetBook::new();
    budgets.upsert("food", 100.0);

    let now = Utc.with_ymd_and_hms(2024, 3, 20, 8, 0, 0).unwrap();
    let payload = r#"{"transactions": [
        {"date": "2024-03-12", "description": "restaurant dinner", "amount": -150.0}
    ]}"#;

    let transactions = Normalizer::new(&catalog)
        .normalize_at(payload, DocumentKind::Statement, now)
        .unwrap();
    let summary = aggregate(&transactions);
    let insights = generate_insights(&summary, &catalog, &budgets);

    let alert = insights
        .iter()
        .find(|i| i.title == "Budget Alert: Food & Dining")
        .expect("budget exceeded alert");
    assert_eq!(alert.severity, Severity::Alert);
    assert!(alert.message.contains("$50.00"));
}

#[test]
fn test_insights_byte_identical_across_runs() {
    let catalog = Catalog::default_catalog();
    let budgets = catalog.default_budgets();
    let now = Utc.with_ymd_and_hms(2024, 3, 20, 8, 0, 0).unwrap();

    let transactions = Normalizer::new(&catalog)
        .normalize_at(statement_payload(), DocumentKind::Statement, now)
        .unwrap();
    let summary = aggregate(&transactions);

    let first = serde_json::to_string(&generate_insights(&summary, &catalog, &budgets)).unwrap();
    let second = serde_json::to_string(&generate_insights(&summary, &catalog, &budgets)).unwrap();
    assert_eq!(first, second);
}
