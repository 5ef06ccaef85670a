use thiserror::Error;

/// Failures from the REST clients wrapping the sibling service and the
/// external catalog. Any of these fails the whole request (no retries,
/// no stale-data fallback).
#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}: {message}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        message: String,
    },

    #[error("Missing data in response: {0}")]
    MissingData(String),
}
