//! Pluggable document-AI backend abstraction
//!
//! The pipeline treats document understanding as an external collaborator
//! behind one narrow interface: bytes in, raw JSON text out. The normalizer
//! consumes that text; nothing else in the core touches the network.
//!
//! # Architecture
//!
//! - `DocumentAI` trait: the interface every backend implements
//! - `DocumentClient` enum: concrete wrapper providing Clone + compile-time
//!   dispatch
//! - Backend implementations: `GeminiBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables (read only in `from_env`; constructors take the
//! key explicitly):
//! - `DOCUMENT_AI_BACKEND`: Backend to use (gemini, mock). Default: gemini
//! - `GEMINI_API_KEY`: API key (required for gemini backend)
//! - `GEMINI_MODEL`: Model name (default: gemini-1.5-flash)

mod gemini;
mod mock;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;

use async_trait::async_trait;

use crate::error::Result;
use crate::normalize::DocumentKind;

/// Trait defining the interface for document-AI backends
#[async_trait]
pub trait DocumentAI: Send + Sync {
    /// Send a document to the service and return the raw JSON text it
    /// produced. Transport failures and service-side refusals surface as
    /// errors; interpreting the text is the normalizer's job.
    async fn extract(&self, data: &[u8], mime_type: &str, kind: DocumentKind) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Model name (for logging)
    fn model(&self) -> &str;

    /// Host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete document-AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum DocumentClient {
    /// Google Gemini (HTTP API)
    Gemini(GeminiBackend),
    /// Mock backend for testing and offline use
    Mock(MockBackend),
}

impl DocumentClient {
    /// Create a client from environment variables.
    ///
    /// Returns None when the selected backend is missing its configuration.
    pub fn from_env() -> Option<Self> {
        let backend =
            std::env::var("DOCUMENT_AI_BACKEND").unwrap_or_else(|_| "gemini".to_string());

        match backend.to_lowercase().as_str() {
            "gemini" => GeminiBackend::from_env().map(DocumentClient::Gemini),
            "mock" => Some(DocumentClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown DOCUMENT_AI_BACKEND, falling back to gemini");
                GeminiBackend::from_env().map(DocumentClient::Gemini)
            }
        }
    }

    /// Create a Gemini backend with an explicit API key
    pub fn gemini(api_key: &str, model: &str) -> Self {
        DocumentClient::Gemini(GeminiBackend::new(api_key, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        DocumentClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl DocumentAI for DocumentClient {
    async fn extract(&self, data: &[u8], mime_type: &str, kind: DocumentKind) -> Result<String> {
        match self {
            DocumentClient::Gemini(b) => b.extract(data, mime_type, kind).await,
            DocumentClient::Mock(b) => b.extract(data, mime_type, kind).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            DocumentClient::Gemini(b) => b.health_check().await,
            DocumentClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            DocumentClient::Gemini(b) => b.model(),
            DocumentClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            DocumentClient::Gemini(b) => b.host(),
            DocumentClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_client() {
        let client = DocumentClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = DocumentClient::mock();
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_extract_is_json() {
        let client = DocumentClient::mock();
        let raw = client
            .extract(b"fake image", "image/png", DocumentKind::Receipt)
            .await
            .unwrap();
        assert!(raw.contains("amount"));
    }
}
