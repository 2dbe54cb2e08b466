//! Error types for tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The document-AI payload has the wrong shape or is not valid JSON.
    /// Not retried here; surfaced to the caller.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A single transaction failed numeric or date validation. The whole
    /// batch is rejected so nothing is lost silently.
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Input of a kind the pipeline cannot interpret (non-object payload,
    /// unsupported file type, oversized upload).
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
