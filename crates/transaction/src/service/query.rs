use crate::{
    abstract_trait::{
        http_client::DynProductHttpClient,
        transaction::{
            repository::DynTransactionQueryRepository, service::TransactionQueryServiceTrait,
        },
    },
    domain::{
        requests::transaction::FindAllTransactions,
        response::{
            api::{ApiResponse, ApiResponsePagination, Pagination},
            transaction::TransactionResponse,
        },
    },
    model::transaction::AdjustmentTransaction as TransactionModel,
    repository::TRANSACTION_PAGE_SIZE,
};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct TransactionQueryService {
    query: DynTransactionQueryRepository,
    product_client: DynProductHttpClient,
    metrics: Metrics,
}

impl TransactionQueryService {
    pub fn new(
        query: DynTransactionQueryRepository,
        product_client: DynProductHttpClient,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();

        registry.register(
            "transaction_query_service_request_counter",
            "Total number of requests to the TransactionQueryService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "transaction_query_service_request_duration",
            "Histogram of request durations for the TransactionQueryService",
            metrics.request_duration.clone(),
        );

        Self {
            query,
            product_client,
            metrics,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("transaction-query-service")
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    async fn complete_tracing(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", if is_success { "SUCCESS" } else { "ERROR" }),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }

    /// The amount of a movement is its quantity times the unit price the
    /// product service reports right now. A failed price lookup fails
    /// the whole read.
    async fn enrich_amount(
        &self,
        transaction: TransactionModel,
    ) -> Result<TransactionResponse, ServiceError> {
        let product = self.product_client.get_product(&transaction.sku).await?;

        let mut response = TransactionResponse::from(transaction);
        response.amount = Some(response.quantity as f64 * product.price);

        Ok(response)
    }

    async fn find_all_inner(
        &self,
        req: &FindAllTransactions,
    ) -> Result<ApiResponsePagination<Vec<TransactionResponse>>, ServiceError> {
        if req.page < 1 {
            return Err(ServiceError::Validation(vec![
                "page: Page must be at least 1".into(),
            ]));
        }

        let total_data = self.query.count().await?;
        let transactions = self.query.find_all(req.page).await?;

        let mut data = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            data.push(self.enrich_amount(transaction).await?);
        }

        Ok(ApiResponsePagination {
            status: "success".to_string(),
            message: "Transactions retrieved successfully".to_string(),
            data,
            pagination: Pagination {
                page: req.page,
                page_size: TRANSACTION_PAGE_SIZE,
                total_data,
                total_page: (total_data as u64).div_ceil(TRANSACTION_PAGE_SIZE as u64) as i64,
            },
        })
    }

    async fn find_by_id_inner(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError> {
        let transaction = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::TransactionNotFound(id.to_string()))?;

        let data = self.enrich_amount(transaction).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Transaction retrieved successfully".to_string(),
            data,
        })
    }

    async fn find_by_sku_inner(
        &self,
        sku: &str,
    ) -> Result<ApiResponse<Vec<TransactionResponse>>, ServiceError> {
        // an unknown sku is not an error here, the empty history is the answer
        let transactions = self.query.find_by_sku(sku).await?;

        let data = transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect();

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Transactions retrieved successfully".to_string(),
            data,
        })
    }
}

#[async_trait]
impl TransactionQueryServiceTrait for TransactionQueryService {
    async fn find_all(
        &self,
        req: &FindAllTransactions,
    ) -> Result<ApiResponsePagination<Vec<TransactionResponse>>, ServiceError> {
        info!("🔍 Finding all transactions | Page: {}", req.page);

        let tracing_ctx = self.start_tracing(
            "transaction_find_all",
            vec![
                KeyValue::new("component", "transaction"),
                KeyValue::new("operation", "find_all"),
                KeyValue::new("page", req.page.to_string()),
            ],
        );

        let result = self.find_all_inner(req).await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Get,
                    true,
                    &format!(
                        "Found {} transactions (total: {})",
                        response.data.len(),
                        response.pagination.total_data
                    ),
                )
                .await
            }
            Err(err) => {
                self.complete_tracing(&tracing_ctx, Method::Get, false, &err.to_string())
                    .await
            }
        }

        result
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError> {
        info!("🆔 Finding transaction by id: {id}");

        let tracing_ctx = self.start_tracing(
            "transaction_find_by_id",
            vec![
                KeyValue::new("component", "transaction"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("transaction.id", id.to_string()),
            ],
        );

        let result = self.find_by_id_inner(id).await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Get,
                    true,
                    &format!("Transaction retrieved: {}", response.data.id),
                )
                .await
            }
            Err(err) => {
                self.complete_tracing(&tracing_ctx, Method::Get, false, &err.to_string())
                    .await
            }
        }

        result
    }

    async fn find_by_sku(
        &self,
        sku: &str,
    ) -> Result<ApiResponse<Vec<TransactionResponse>>, ServiceError> {
        info!("🔖 Finding transactions by sku: {sku}");

        let tracing_ctx = self.start_tracing(
            "transaction_find_by_sku",
            vec![
                KeyValue::new("component", "transaction"),
                KeyValue::new("operation", "find_by_sku"),
                KeyValue::new("transaction.sku", sku.to_string()),
            ],
        );

        let result = self.find_by_sku_inner(sku).await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Get,
                    true,
                    &format!("Found {} transactions for sku {sku}", response.data.len()),
                )
                .await
            }
            Err(err) => {
                self.complete_tracing(&tracing_ctx, Method::Get, false, &err.to_string())
                    .await
            }
        }

        result
    }
}
