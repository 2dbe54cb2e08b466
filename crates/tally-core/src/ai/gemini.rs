//! Gemini backend implementation
//!
//! HTTP client for the Google Generative Language API. Uploads are
//! validated (file type, size) before anything leaves the machine; the API
//! key is injected at construction, never read from ambient state here.

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::normalize::DocumentKind;

use super::DocumentAI;

const DEFAULT_HOST: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// File types the service accepts
const SUPPORTED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/heic",
    "image/heif",
    "application/pdf",
];

/// Upload cap, bytes
const MAX_FILE_SIZE: usize = 4 * 1024 * 1024;

const RECEIPT_PROMPT: &str = "\
You are a financial data extraction expert. Analyze this receipt image and \
extract the purchase in a precise JSON format:
{
  \"amount\": number (the receipt total),
  \"merchant\": \"store or vendor name\",
  \"category\": \"optional category if obvious\"
}

Important:
- Use the final total including tax and tip
- Keep the merchant name exactly as printed
- Provide only the JSON response, no additional text";

const STATEMENT_PROMPT: &str = "\
You are a financial data extraction expert. Analyze this bank statement and \
extract all transactions in a precise JSON format:
{
  \"transactions\": [
    {
      \"date\": \"YYYY-MM-DD\",
      \"description\": \"exact transaction description\",
      \"amount\": number (positive for credits like salary, negative for debits like purchases)
    }
  ]
}

Important:
- Keep the exact descriptions as shown in the statement
- Maintain the exact dates in YYYY-MM-DD format
- Use negative numbers for expenses/debits and positive for income/credits
- Provide only the JSON response, no additional text";

/// Gemini document-AI backend
#[derive(Clone)]
pub struct GeminiBackend {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    /// Create a new Gemini backend with an explicit API key
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_host(DEFAULT_HOST, api_key, model)
    }

    /// Create with a custom host (tests point this at a local server)
    pub fn with_host(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: if model.is_empty() {
                DEFAULT_MODEL.to_string()
            } else {
                model.to_string()
            },
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Some(Self::new(&api_key, &model))
    }

    fn validate_upload(data: &[u8], mime_type: &str) -> Result<()> {
        if !SUPPORTED_MIME_TYPES.contains(&mime_type) {
            return Err(Error::UnsupportedInput(format!(
                "unsupported file type: {}. Upload a JPEG, PNG, WEBP, HEIC, HEIF or PDF",
                mime_type
            )));
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(Error::UnsupportedInput(format!(
                "file too large: {:.2}MB exceeds the 4MB limit",
                data.len() as f64 / (1024.0 * 1024.0)
            )));
        }
        Ok(())
    }
}

/// Request to the generateContent endpoint
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Response from the generateContent endpoint
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl DocumentAI for GeminiBackend {
    async fn extract(&self, data: &[u8], mime_type: &str, kind: DocumentKind) -> Result<String> {
        Self::validate_upload(data, mime_type)?;

        let prompt = match kind {
            DocumentKind::Receipt => RECEIPT_PROMPT,
            DocumentKind::Statement => STATEMENT_PROMPT,
        };

        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart {
                        text: Some(prompt.to_string()),
                        inline_data: None,
                    },
                    RequestPart {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: mime_type.to_string(),
                            data: base64::engine::general_purpose::STANDARD.encode(data),
                        }),
                    },
                ],
            }],
        };

        let response = self
            .http_client
            .post(format!(
                "{}/v1beta/models/{}:generateContent?key={}",
                self.base_url, self.model, self.api_key
            ))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let generate_response: GenerateResponse = response.json().await?;
        let text: String = generate_response
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::MalformedResponse("empty response from model".into()));
        }

        debug!(kind = %kind, chars = text.len(), "gemini extraction complete");
        Ok(text)
    }

    async fn health_check(&self) -> bool {
        self.http_client
            .get(format!("{}/v1beta/models?key={}", self.base_url, self.api_key))
            .send()
            .await
            .map(|response| response.status().is_success())
            .unwrap_or(false)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_upload_rejects_unknown_mime() {
        let result = GeminiBackend::validate_upload(b"data", "text/html");
        assert!(matches!(result, Err(Error::UnsupportedInput(_))));
    }

    #[test]
    fn test_validate_upload_rejects_oversized() {
        let oversized = vec![0u8; MAX_FILE_SIZE + 1];
        let result = GeminiBackend::validate_upload(&oversized, "image/png");
        assert!(matches!(result, Err(Error::UnsupportedInput(ref reason)) if reason.contains("4MB")));
    }

    #[test]
    fn test_validate_upload_accepts_supported_types() {
        for mime in SUPPORTED_MIME_TYPES {
            assert!(GeminiBackend::validate_upload(b"data", mime).is_ok());
        }
    }

    #[test]
    fn test_empty_model_falls_back_to_default() {
        let backend = GeminiBackend::new("key", "");
        assert_eq!(backend.model(), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_health_check_unreachable_host() {
        let backend = GeminiBackend::with_host("http://127.0.0.1:1", "key", DEFAULT_MODEL);
        assert!(!backend.health_check().await);
    }
}
