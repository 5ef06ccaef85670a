use crate::{
    abstract_trait::http_client::TransactionHttpClientTrait,
    domain::response::{api::ApiResponse, transaction::TransactionResponse},
};
use async_trait::async_trait;
use axum::http::HeaderMap;
use opentelemetry::global;
use serde_json::json;
use shared::{errors::HttpClientError, utils::HeaderInjector};
use tracing::info;

pub struct TransactionHttpClientService {
    client: reqwest::Client,
    base_url: String,
}

impl TransactionHttpClientService {
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

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, HttpClientError> {
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
        Ok(response)
    }
}

#[async_trait]
impl TransactionHttpClientTrait for TransactionHttpClientService {
    async fn get_transactions(
        &self,
        sku: &str,
    ) -> Result<Vec<TransactionResponse>, HttpClientError> {
        let url = format!("{}/api/transactions/sku/{sku}", self.base_url);

        let response = self
            .client
            .get(&url)
            .headers(self.trace_headers())
            .send()
            .await?;

        let body: ApiResponse<Vec<TransactionResponse>> =
            Self::ensure_success(response).await?.json().await?;

        info!(
            "📥 Fetched {} transactions for sku {sku}",
            body.data.len()
        );

        Ok(body.data)
    }

    async fn insert_transaction(&self, sku: &str, quantity: i64) -> Result<(), HttpClientError> {
        let url = format!("{}/api/transactions/seed", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.trace_headers())
            .json(&json!({ "sku": sku, "quantity": quantity }))
            .send()
            .await?;

        Self::ensure_success(response).await?;

        info!("📤 Seeded transaction for sku {sku} with quantity {quantity}");

        Ok(())
    }

    async fn delete_transactions_by_sku(&self, sku: &str) -> Result<(), HttpClientError> {
        let url = format!("{}/api/transactions/sku/{sku}", self.base_url);

        let response = self
            .client
            .delete(&url)
            .headers(self.trace_headers())
            .send()
            .await?;

        Self::ensure_success(response).await?;

        info!("🗑️ Deleted transactions for sku {sku}");

        Ok(())
    }
}
