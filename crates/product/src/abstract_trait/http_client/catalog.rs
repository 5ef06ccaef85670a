use crate::domain::response::catalog::CatalogProductRecord;
use async_trait::async_trait;
use shared::errors::HttpClientError;
use std::sync::Arc;

pub type DynCatalogHttpClient = Arc<dyn CatalogHttpClientTrait + Send + Sync>;

#[async_trait]
pub trait CatalogHttpClientTrait {
    async fn get_products(&self) -> Result<Vec<CatalogProductRecord>, HttpClientError>;
}
