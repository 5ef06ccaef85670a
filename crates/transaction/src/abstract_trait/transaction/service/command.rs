use crate::domain::{
    requests::transaction::{CreateTransactionRequest, UpdateTransactionRequest},
    response::{api::ApiResponse, transaction::TransactionResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynTransactionCommandService = Arc<dyn TransactionCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait TransactionCommandServiceTrait {
    /// Guarded create: the sku must already have at least one recorded
    /// adjustment, and the resulting balance must stay non-negative.
    async fn create_transaction(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError>;
    /// Unguarded insert used by the product service's catalog seeding
    /// flow to record the very first stock-in of a brand-new sku.
    async fn seed_transaction(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError>;
    async fn update_transaction(
        &self,
        req: &UpdateTransactionRequest,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError>;
    async fn delete_transaction(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError>;
    async fn delete_transactions_by_sku(
        &self,
        sku: &str,
    ) -> Result<ApiResponse<Vec<TransactionResponse>>, ServiceError>;
}
