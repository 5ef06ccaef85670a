use crate::domain::response::transaction::TransactionResponse;
use async_trait::async_trait;
use shared::errors::HttpClientError;
use std::sync::Arc;

pub type DynTransactionHttpClient = Arc<dyn TransactionHttpClientTrait + Send + Sync>;

/// REST port towards the transaction service: read the adjustment
/// history of a sku, seed an initial adjustment, cascade a delete.
#[async_trait]
pub trait TransactionHttpClientTrait {
    async fn get_transactions(&self, sku: &str)
    -> Result<Vec<TransactionResponse>, HttpClientError>;
    async fn insert_transaction(&self, sku: &str, quantity: i64) -> Result<(), HttpClientError>;
    async fn delete_transactions_by_sku(&self, sku: &str) -> Result<(), HttpClientError>;
}
