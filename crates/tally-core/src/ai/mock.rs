//! Mock backend for testing
//!
//! Returns canned payloads shaped like real model output (markdown fences
//! included) so the full normalization path gets exercised without a
//! network.

use async_trait::async_trait;

use crate::error::Result;
use crate::normalize::DocumentKind;

use super::DocumentAI;

/// Mock document-AI backend
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should report reachable
    pub healthy: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self { healthy: true }
    }

    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl DocumentAI for MockBackend {
    async fn extract(&self, _data: &[u8], _mime_type: &str, kind: DocumentKind) -> Result<String> {
        let payload = match kind {
            DocumentKind::Receipt => {
                "```json\n{\"amount\": 27.80, \"merchant\": \"Mock Cafe\"}\n```"
            }
            DocumentKind::Statement => {
                r#"{"transactions": [
                    {"date": "2024-03-01", "description": "ACME CORP SALARY", "amount": 2600.00},
                    {"date": "2024-03-03", "description": "WHOLE FOODS MARKET", "amount": -84.12},
                    {"date": "2024-03-05", "description": "UBER *TRIP", "amount": -17.50}
                ]}"#
            }
        };
        Ok(payload.to_string())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::normalize::Normalizer;

    #[tokio::test]
    async fn test_mock_receipt_normalizes() {
        let backend = MockBackend::new();
        let raw = backend
            .extract(b"bytes", "image/jpeg", DocumentKind::Receipt)
            .await
            .unwrap();

        let catalog = Catalog::default_catalog();
        let transactions = Normalizer::new(&catalog)
            .normalize(&raw, DocumentKind::Receipt)
            .unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, -27.80);
    }

    #[tokio::test]
    async fn test_mock_statement_normalizes() {
        let backend = MockBackend::new();
        let raw = backend
            .extract(b"bytes", "application/pdf", DocumentKind::Statement)
            .await
            .unwrap();

        let catalog = Catalog::default_catalog();
        let transactions = Normalizer::new(&catalog)
            .normalize(&raw, DocumentKind::Statement)
            .unwrap();
        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions[0].category_id, "income");
    }

    #[tokio::test]
    async fn test_unhealthy_mock() {
        assert!(!MockBackend::unhealthy().health_check().await);
    }
}
