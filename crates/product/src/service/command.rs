use crate::{
    abstract_trait::{
        http_client::{DynCatalogHttpClient, DynTransactionHttpClient},
        product::{
            repository::{DynProductCommandRepository, DynProductQueryRepository},
            service::ProductCommandServiceTrait,
        },
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::{api::ApiResponse, product::ProductResponse},
    },
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use chrono::Utc;
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
pub struct ProductCommandService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    transaction_client: DynTransactionHttpClient,
    catalog_client: DynCatalogHttpClient,
    metrics: Metrics,
}

pub struct ProductCommandServiceDeps {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
    pub transaction_client: DynTransactionHttpClient,
    pub catalog_client: DynCatalogHttpClient,
}

impl ProductCommandService {
    pub fn new(deps: ProductCommandServiceDeps, registry: &mut Registry) -> Self {
        let ProductCommandServiceDeps {
            query,
            command,
            transaction_client,
            catalog_client,
        } = deps;

        let metrics = Metrics::new();

        registry.register(
            "product_command_service_request_counter",
            "Total number of requests to the ProductCommandService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "product_command_service_request_duration",
            "Histogram of request durations for the ProductCommandService",
            metrics.request_duration.clone(),
        );

        Self {
            query,
            command,
            transaction_client,
            catalog_client,
            metrics,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("product-command-service")
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

    async fn create_product_inner(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        if self.query.find_by_sku(&req.sku).await?.is_some() {
            return Err(ServiceError::SkuAlreadyExists(req.sku.clone()));
        }

        let now = Utc::now();
        let product = ProductModel {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            sku: req.sku.clone(),
            image: req.image.clone(),
            price: req.price,
            description: Some(req.description.clone().unwrap_or_default()),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let created = self.command.create(&product).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product created successfully".to_string(),
            data: ProductResponse::from(created),
        })
    }

    async fn update_product_inner(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let id = req
            .id
            .ok_or_else(|| ServiceError::Validation(vec!["id: Id is required".into()]))?;

        let mut product = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::ProductNotFound(id.to_string()))?;

        // Empty strings and a zero price count as "not supplied" and keep
        // the stored value. Preserved source behavior: a legitimate price
        // of 0 cannot be set through this endpoint.
        if let Some(name) = &req.name
            && !name.is_empty()
        {
            product.name = name.clone();
        }

        if let Some(sku) = &req.sku
            && !sku.is_empty()
        {
            if let Some(other) = self.query.find_by_sku(sku).await?
                && other.id != product.id
            {
                return Err(ServiceError::SkuAlreadyExists(sku.clone()));
            }

            product.sku = sku.clone();
        }

        if let Some(image) = &req.image
            && !image.is_empty()
        {
            product.image = image.clone();
        }

        if let Some(price) = req.price
            && price != 0.0
        {
            product.price = price;
        }

        if let Some(description) = &req.description
            && !description.is_empty()
        {
            product.description = Some(description.clone());
        }

        product.updated_at = Utc::now();

        let updated = self.command.update(&product).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product updated successfully".to_string(),
            data: ProductResponse::from(updated),
        })
    }

    async fn delete_product_inner(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::ProductNotFound(id.to_string()))?;

        // cascade first, best effort: the remote delete is not rolled
        // back if the local delete fails afterwards
        self.transaction_client
            .delete_transactions_by_sku(&product.sku)
            .await?;

        self.command.delete(id).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product deleted successfully".to_string(),
            data: ProductResponse::from(product),
        })
    }

    async fn init_products_inner(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let catalog = self.catalog_client.get_products().await?;

        let mut data = Vec::with_capacity(catalog.len());

        for record in catalog {
            let now = Utc::now();
            let product = ProductModel {
                id: Uuid::new_v4(),
                name: record.name,
                sku: record.sku,
                image: record.image,
                price: record.price,
                description: record.description,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            };

            if self.query.find_by_sku(&product.sku).await?.is_none() {
                // seed the opening stock remotely and persist locally;
                // the two calls have no ordering dependency
                let (seeded, created) = tokio::join!(
                    self.transaction_client
                        .insert_transaction(&product.sku, record.stock),
                    self.command.create(&product),
                );

                seeded?;
                created?;
            }

            // the reported stock stays the external inventory figure
            let mut response = ProductResponse::from(product);
            response.stock = Some(record.stock);
            data.push(response);
        }

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Products initialized successfully".to_string(),
            data,
        })
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("📦 Creating product with sku: {}", req.sku);

        let tracing_ctx = self.start_tracing(
            "product_create",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
                KeyValue::new("product.sku", req.sku.clone()),
            ],
        );

        let result = self.create_product_inner(req).await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Post,
                    true,
                    &format!("Product created with id {}", response.data.id),
                )
                .await
            }
            Err(err) => {
                self.complete_tracing(&tracing_ctx, Method::Post, false, &err.to_string())
                    .await
            }
        }

        result
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("✏️ Updating product: {:?}", req.id);

        let tracing_ctx = self.start_tracing(
            "product_update",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new(
                    "product.id",
                    req.id.map(|id| id.to_string()).unwrap_or_default(),
                ),
            ],
        );

        let result = self.update_product_inner(req).await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Put,
                    true,
                    &format!("Product updated: {}", response.data.id),
                )
                .await
            }
            Err(err) => {
                self.complete_tracing(&tracing_ctx, Method::Put, false, &err.to_string())
                    .await
            }
        }

        result
    }

    async fn delete_product(&self, id: Uuid) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🗑️ Deleting product: {id}");

        let tracing_ctx = self.start_tracing(
            "product_delete",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = self.delete_product_inner(id).await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Delete,
                    true,
                    &format!("Product deleted: {}", response.data.id),
                )
                .await
            }
            Err(err) => {
                self.complete_tracing(&tracing_ctx, Method::Delete, false, &err.to_string())
                    .await
            }
        }

        result
    }

    async fn init_products(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        info!("🌱 Initializing products from external catalog");

        let tracing_ctx = self.start_tracing(
            "product_init",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "init"),
            ],
        );

        let result = self.init_products_inner().await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Post,
                    true,
                    &format!("Catalog initialized with {} products", response.data.len()),
                )
                .await
            }
            Err(err) => {
                self.complete_tracing(&tracing_ctx, Method::Post, false, &err.to_string())
                    .await
            }
        }

        result
    }
}
