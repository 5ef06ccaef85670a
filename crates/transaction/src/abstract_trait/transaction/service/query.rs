use crate::domain::{
    requests::transaction::FindAllTransactions,
    response::{
        api::{ApiResponse, ApiResponsePagination},
        transaction::TransactionResponse,
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynTransactionQueryService = Arc<dyn TransactionQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait TransactionQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllTransactions,
    ) -> Result<ApiResponsePagination<Vec<TransactionResponse>>, ServiceError>;
    async fn find_by_id(&self, id: Uuid)
    -> Result<ApiResponse<TransactionResponse>, ServiceError>;
    async fn find_by_sku(
        &self,
        sku: &str,
    ) -> Result<ApiResponse<Vec<TransactionResponse>>, ServiceError>;
}
