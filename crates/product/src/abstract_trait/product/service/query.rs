use crate::domain::{
    requests::product::FindAllProducts,
    response::{
        api::{ApiResponse, ApiResponsePagination},
        product::{ProductResponse, ProductStockResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<ProductStockResponse>, ServiceError>;
    async fn find_by_sku(
        &self,
        sku: &str,
    ) -> Result<ApiResponse<ProductStockResponse>, ServiceError>;
}
