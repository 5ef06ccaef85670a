use crate::{
    abstract_trait::transaction::{
        repository::{DynTransactionCommandRepository, DynTransactionQueryRepository},
        service::TransactionCommandServiceTrait,
    },
    domain::{
        requests::transaction::{CreateTransactionRequest, UpdateTransactionRequest},
        response::{api::ApiResponse, transaction::TransactionResponse},
    },
    model::transaction::AdjustmentTransaction as TransactionModel,
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
pub struct TransactionCommandService {
    query: DynTransactionQueryRepository,
    command: DynTransactionCommandRepository,
    metrics: Metrics,
}

impl TransactionCommandService {
    pub fn new(
        query: DynTransactionQueryRepository,
        command: DynTransactionCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();

        registry.register(
            "transaction_command_service_request_counter",
            "Total number of requests to the TransactionCommandService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "transaction_command_service_request_duration",
            "Histogram of request durations for the TransactionCommandService",
            metrics.request_duration.clone(),
        );

        Self {
            query,
            command,
            metrics,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("transaction-command-service")
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

    async fn insert(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError> {
        let transaction = TransactionModel {
            id: Uuid::new_v4(),
            sku: req.sku.clone(),
            quantity: req.quantity,
            created_at: Utc::now(),
        };

        let created = self.command.create(&transaction).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Transaction created successfully".to_string(),
            data: TransactionResponse::from(created),
        })
    }

    async fn create_transaction_inner(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError> {
        let existing = self.query.find_by_sku(&req.sku).await?;

        // a sku is only known to this service once it has at least one
        // recorded movement; first stock-in arrives through seeding
        if existing.is_empty() {
            return Err(ServiceError::SkuNotFound(req.sku.clone()));
        }

        let balance: i64 = existing.iter().map(|t| t.quantity).sum();

        if balance + req.quantity < 0 {
            return Err(ServiceError::StockNotAvailable(req.sku.clone()));
        }

        self.insert(req).await
    }

    async fn update_transaction_inner(
        &self,
        req: &UpdateTransactionRequest,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError> {
        let id = req
            .id
            .ok_or_else(|| ServiceError::Validation(vec!["id: Id is required".into()]))?;

        let mut transaction = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::TransactionNotFound(id.to_string()))?;

        // empty sku and zero quantity count as "not supplied"; the
        // resulting balance is deliberately not re-checked here
        if let Some(sku) = &req.sku
            && !sku.is_empty()
        {
            transaction.sku = sku.clone();
        }

        if let Some(quantity) = req.quantity
            && quantity != 0
        {
            transaction.quantity = quantity;
        }

        let updated = self.command.update(&transaction).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Transaction updated successfully".to_string(),
            data: TransactionResponse::from(updated),
        })
    }

    async fn delete_transaction_inner(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError> {
        let transaction = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::TransactionNotFound(id.to_string()))?;

        self.command.delete(id).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Transaction deleted successfully".to_string(),
            data: TransactionResponse::from(transaction),
        })
    }

    async fn delete_transactions_by_sku_inner(
        &self,
        sku: &str,
    ) -> Result<ApiResponse<Vec<TransactionResponse>>, ServiceError> {
        // report what was on record before the delete; an empty history
        // still deletes (a no-op) and succeeds
        let transactions = self.query.find_by_sku(sku).await?;

        self.command.delete_by_sku(sku).await?;

        let data = transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect();

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Transactions deleted successfully".to_string(),
            data,
        })
    }
}

#[async_trait]
impl TransactionCommandServiceTrait for TransactionCommandService {
    async fn create_transaction(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError> {
        info!(
            "📦 Creating transaction for sku {} with quantity {}",
            req.sku, req.quantity
        );

        let tracing_ctx = self.start_tracing(
            "transaction_create",
            vec![
                KeyValue::new("component", "transaction"),
                KeyValue::new("operation", "create"),
                KeyValue::new("transaction.sku", req.sku.clone()),
            ],
        );

        let result = self.create_transaction_inner(req).await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Post,
                    true,
                    &format!("Transaction created with id {}", response.data.id),
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

    async fn seed_transaction(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError> {
        info!(
            "🌱 Seeding transaction for sku {} with quantity {}",
            req.sku, req.quantity
        );

        let tracing_ctx = self.start_tracing(
            "transaction_seed",
            vec![
                KeyValue::new("component", "transaction"),
                KeyValue::new("operation", "seed"),
                KeyValue::new("transaction.sku", req.sku.clone()),
            ],
        );

        let result = self.insert(req).await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Post,
                    true,
                    &format!("Transaction seeded with id {}", response.data.id),
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

    async fn update_transaction(
        &self,
        req: &UpdateTransactionRequest,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError> {
        info!("✏️ Updating transaction: {:?}", req.id);

        let tracing_ctx = self.start_tracing(
            "transaction_update",
            vec![
                KeyValue::new("component", "transaction"),
                KeyValue::new("operation", "update"),
                KeyValue::new(
                    "transaction.id",
                    req.id.map(|id| id.to_string()).unwrap_or_default(),
                ),
            ],
        );

        let result = self.update_transaction_inner(req).await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Put,
                    true,
                    &format!("Transaction updated: {}", response.data.id),
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

    async fn delete_transaction(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<TransactionResponse>, ServiceError> {
        info!("🗑️ Deleting transaction: {id}");

        let tracing_ctx = self.start_tracing(
            "transaction_delete",
            vec![
                KeyValue::new("component", "transaction"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("transaction.id", id.to_string()),
            ],
        );

        let result = self.delete_transaction_inner(id).await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Delete,
                    true,
                    &format!("Transaction deleted: {}", response.data.id),
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

    async fn delete_transactions_by_sku(
        &self,
        sku: &str,
    ) -> Result<ApiResponse<Vec<TransactionResponse>>, ServiceError> {
        info!("🗑️ Deleting transactions for sku: {sku}");

        let tracing_ctx = self.start_tracing(
            "transaction_delete_by_sku",
            vec![
                KeyValue::new("component", "transaction"),
                KeyValue::new("operation", "delete_by_sku"),
                KeyValue::new("transaction.sku", sku.to_string()),
            ],
        );

        let result = self.delete_transactions_by_sku_inner(sku).await;

        match &result {
            Ok(response) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Delete,
                    true,
                    &format!("Deleted {} transactions for sku {sku}", response.data.len()),
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
}
