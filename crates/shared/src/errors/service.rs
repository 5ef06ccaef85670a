use crate::errors::{client::HttpClientError, repository::RepositoryError};
use thiserror::Error;

/// Closed taxonomy of use-case outcomes. Every orchestrator returns
/// success or exactly one of these variants; the HTTP boundary maps
/// them to status codes exhaustively.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Client error: {0}")]
    Client(#[from] HttpClientError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Adjustment transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("No adjustment transaction exists for sku {0}")]
    SkuNotFound(String),

    #[error("A product with sku {0} already exists")]
    SkuAlreadyExists(String),

    #[error("Stock not available for sku {0}")]
    StockNotAvailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
