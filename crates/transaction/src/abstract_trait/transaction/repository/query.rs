use crate::model::transaction::AdjustmentTransaction as TransactionModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynTransactionQueryRepository = Arc<dyn TransactionQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait TransactionQueryRepositoryTrait {
    async fn count(&self) -> Result<i64, RepositoryError>;
    async fn find_all(&self, page: i64) -> Result<Vec<TransactionModel>, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TransactionModel>, RepositoryError>;
    async fn find_by_sku(&self, sku: &str) -> Result<Vec<TransactionModel>, RepositoryError>;
}
