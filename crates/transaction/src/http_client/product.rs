use crate::{
    abstract_trait::http_client::ProductHttpClientTrait,
    domain::response::{api::ApiResponse, product::ProductResponse},
};
use async_trait::async_trait;
use axum::http::HeaderMap;
use opentelemetry::global;
use shared::{errors::HttpClientError, utils::HeaderInjector};
use tracing::info;

pub struct ProductHttpClientService {
    client: reqwest::Client,
    base_url: String,
}

impl ProductHttpClientService {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn trace_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let cx = opentelemetry::Context::current();
        global::get_text_map_propagator(|propagator| {
            propagator.inject_context(&cx, &mut HeaderInjector(&mut headers))
        });
        headers
    }
}

#[async_trait]
impl ProductHttpClientTrait for ProductHttpClientService {
    async fn get_product(&self, sku: &str) -> Result<ProductResponse, HttpClientError> {
        let url = format!("{}/api/products/sku/{sku}", self.base_url);

        let response = self
            .client
            .get(&url)
            .headers(self.trace_headers())
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

        let body: ApiResponse<ProductResponse> = response.json().await?;

        info!("📥 Fetched product for sku {sku}");

        Ok(body.data)
    }
}
