use crate::{
    abstract_trait::http_client::CatalogHttpClientTrait,
    domain::response::catalog::{CatalogListing, CatalogProductRecord},
};
use async_trait::async_trait;
use shared::errors::HttpClientError;
use tracing::info;

/// Client for the third-party marketplace used to seed the catalog on
/// first boot. The listing is public read-only data keyed by api key.
pub struct CatalogHttpClientService {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CatalogHttpClientService {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl CatalogHttpClientTrait for CatalogHttpClientService {
    async fn get_products(&self) -> Result<Vec<CatalogProductRecord>, HttpClientError> {
        let url = format!("{}/product/listing", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("openapikey", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let url = response.url().to_string();
            let message = response.text().await.unwrap_or_default();
            return Err(HttpClientError::UnexpectedStatus {
                status,
                url,
                message,
            });
        }

        let listing: CatalogListing = response.json().await?;

        // marketplace seller codes may contain slashes, which our sku
        // path parameters cannot carry
        let products = listing
            .products
            .into_iter()
            .map(|mut record| {
                record.sku = record.sku.replace('/', "");
                record
            })
            .collect::<Vec<_>>();

        info!("📥 Fetched {} products from external catalog", products.len());

        Ok(products)
    }
}
