use crate::model::product::Product as ProductModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create(&self, product: &ProductModel) -> Result<ProductModel, RepositoryError>;
    async fn update(&self, product: &ProductModel) -> Result<ProductModel, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
