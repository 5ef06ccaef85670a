use crate::domain::response::product::ProductResponse;
use async_trait::async_trait;
use shared::errors::HttpClientError;
use std::sync::Arc;

pub type DynProductHttpClient = Arc<dyn ProductHttpClientTrait + Send + Sync>;

/// REST port towards the product service, used to fetch the current
/// unit price when deriving transaction amounts.
#[async_trait]
pub trait ProductHttpClientTrait {
    async fn get_product(&self, sku: &str) -> Result<ProductResponse, HttpClientError>;
}
