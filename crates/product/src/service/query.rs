use crate::{
    abstract_trait::{
        http_client::DynTransactionHttpClient,
        product::{repository::DynProductQueryRepository, service::ProductQueryServiceTrait},
    },
    domain::{
        requests::product::FindAllProducts,
        response::{
            api::{ApiResponse, ApiResponsePagination, Pagination},
            product::{ProductResponse, ProductStockResponse},
        },
    },
    repository::PRODUCT_PAGE_SIZE,
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
pub struct ProductQueryService {
    query: DynProductQueryRepository,
    transaction_client: DynTransactionHttpClient,
    metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(
        query: DynProductQueryRepository,
        transaction_client: DynTransactionHttpClient,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();

        registry.register(
            "product_query_service_request_counter",
            "Total number of requests to the ProductQueryService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "product_query_service_request_duration",
            "Histogram of request durations for the ProductQueryService",
            metrics.request_duration.clone(),
        );

        Self {
            query,
            transaction_client,
            metrics,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("product-query-service")
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

    /// Current stock of a sku is the sum of every adjustment quantity
    /// the transaction service holds for it. Never cached.
    async fn resolve_stock(&self, sku: &str) -> Result<i64, ServiceError> {
        let transactions = self.transaction_client.get_transactions(sku).await?;

        Ok(transactions.iter().map(|t| t.quantity).sum())
    }

    async fn find_all_inner(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        if req.page < 1 {
            return Err(ServiceError::Validation(vec![
                "page: Page must be at least 1".into(),
            ]));
        }

        let total_data = self.query.count().await?;
        let products = self.query.find_all(req.page).await?;

        let mut data = Vec::with_capacity(products.len());
        for product in products {
            let stock = self.resolve_stock(&product.sku).await?;

            let mut response = ProductResponse::from(product);
            response.stock = Some(stock);
            data.push(response);
        }

        Ok(ApiResponsePagination {
            status: "success".to_string(),
            message: "Products retrieved successfully".to_string(),
            data,
            pagination: Pagination {
                page: req.page,
                page_size: PRODUCT_PAGE_SIZE,
                total_data,
                total_page: (total_data as u64).div_ceil(PRODUCT_PAGE_SIZE as u64) as i64,
            },
        })
    }

    async fn find_by_id_inner(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<ProductStockResponse>, ServiceError> {
        let product = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::ProductNotFound(id.to_string()))?;

        let stock = self.resolve_stock(&product.sku).await?;

        let mut data = ProductStockResponse::from(product);
        data.stock = Some(stock);

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product retrieved successfully".to_string(),
            data,
        })
    }

    async fn find_by_sku_inner(
        &self,
        sku: &str,
    ) -> Result<ApiResponse<ProductStockResponse>, ServiceError> {
        let product = self
            .query
            .find_by_sku(sku)
            .await?
            .ok_or_else(|| ServiceError::ProductNotFound(sku.to_string()))?;

        let stock = self.resolve_stock(&product.sku).await?;

        let mut data = ProductStockResponse::from(product);
        data.stock = Some(stock);

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product retrieved successfully".to_string(),
            data,
        })
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        info!("🔍 Finding all products | Page: {}", req.page);

        let tracing_ctx = self.start_tracing(
            "product_find_all",
            vec![
                KeyValue::new("component", "product"),
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
                        "Found {} products (total: {})",
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

    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<ProductStockResponse>, ServiceError> {
        info!("🆔 Finding product by id: {id}");

        let tracing_ctx = self.start_tracing(
            "product_find_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = self.find_by_id_inner(id).await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Get,
                    true,
                    &format!("Product retrieved: '{}'", response.data.name),
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
    ) -> Result<ApiResponse<ProductStockResponse>, ServiceError> {
        info!("🔖 Finding product by sku: {sku}");

        let tracing_ctx = self.start_tracing(
            "product_find_by_sku",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_sku"),
                KeyValue::new("product.sku", sku.to_string()),
            ],
        );

        let result = self.find_by_sku_inner(sku).await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Get,
                    true,
                    &format!("Product retrieved: '{}'", response.data.name),
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
