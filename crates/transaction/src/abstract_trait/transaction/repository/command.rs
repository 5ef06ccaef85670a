use crate::model::transaction::AdjustmentTransaction as TransactionModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynTransactionCommandRepository = Arc<dyn TransactionCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait TransactionCommandRepositoryTrait {
    async fn create(
        &self,
        transaction: &TransactionModel,
    ) -> Result<TransactionModel, RepositoryError>;
    async fn update(
        &self,
        transaction: &TransactionModel,
    ) -> Result<TransactionModel, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// No-op when the sku holds no rows.
    async fn delete_by_sku(&self, sku: &str) -> Result<(), RepositoryError>;
}
