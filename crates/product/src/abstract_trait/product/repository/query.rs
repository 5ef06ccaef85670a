use crate::model::product::Product as ProductModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn count(&self) -> Result<i64, RepositoryError>;
    async fn find_all(&self, page: i64) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductModel>, RepositoryError>;
    async fn find_by_sku(&self, sku: &str) -> Result<Option<ProductModel>, RepositoryError>;
}
