use crate::{
    abstract_trait::transaction::service::{
        DynTransactionCommandService, DynTransactionQueryService,
    },
    domain::{
        requests::transaction::{
            CreateTransactionRequest, FindAllTransactions, UpdateTransactionRequest,
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            transaction::TransactionResponse,
        },
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::{
    errors::{ErrorResponse, HttpError},
    middleware::ValidatedJson,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transaction",
    params(FindAllTransactions),
    responses(
        (status = 200, description = "List of transactions with derived amounts", body = ApiResponsePagination<Vec<TransactionResponse>>),
        (status = 400, description = "Invalid page", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_transactions(
    Extension(service): Extension<DynTransactionQueryService>,
    Query(params): Query<FindAllTransactions>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = "Transaction",
    params(("id" = Uuid, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction with derived amount", body = ApiResponse<TransactionResponse>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_transaction(
    Extension(service): Extension<DynTransactionQueryService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/transactions/sku/{sku}",
    tag = "Transaction",
    params(("sku" = String, Path, description = "Product sku")),
    responses(
        (status = 200, description = "Adjustment history of the sku, possibly empty", body = ApiResponse<Vec<TransactionResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_transactions_by_sku(
    Extension(service): Extension<DynTransactionQueryService>,
    Path(sku): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_sku(&sku).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transaction",
    request_body = CreateTransactionRequest,
    responses(
        (status = 200, description = "Created transaction", body = ApiResponse<TransactionResponse>),
        (status = 400, description = "Validation failed or stock not available", body = ErrorResponse),
        (status = 404, description = "Sku has no recorded transactions", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_transaction(
    Extension(service): Extension<DynTransactionCommandService>,
    ValidatedJson(body): ValidatedJson<CreateTransactionRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_transaction(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/transactions/seed",
    tag = "Transaction",
    request_body = CreateTransactionRequest,
    responses(
        (status = 200, description = "Seeded transaction", body = ApiResponse<TransactionResponse>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn seed_transaction(
    Extension(service): Extension<DynTransactionCommandService>,
    ValidatedJson(body): ValidatedJson<CreateTransactionRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.seed_transaction(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    tag = "Transaction",
    params(("id" = Uuid, Path, description = "Transaction id")),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Updated transaction", body = ApiResponse<TransactionResponse>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_transaction(
    Extension(service): Extension<DynTransactionCommandService>,
    Path(id): Path<Uuid>,
    ValidatedJson(mut body): ValidatedJson<UpdateTransactionRequest>,
) -> Result<impl IntoResponse, HttpError> {
    body.id = Some(id);

    let response = service.update_transaction(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "Transaction",
    params(("id" = Uuid, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Deleted transaction", body = ApiResponse<TransactionResponse>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_transaction(
    Extension(service): Extension<DynTransactionCommandService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_transaction(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/transactions/sku/{sku}",
    tag = "Transaction",
    params(("sku" = String, Path, description = "Product sku")),
    responses(
        (status = 200, description = "Transactions removed for the sku, possibly none", body = ApiResponse<Vec<TransactionResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_transactions_by_sku(
    Extension(service): Extension<DynTransactionCommandService>,
    Path(sku): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_transactions_by_sku(&sku).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn transaction_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/transactions", get(get_transactions))
        .route("/api/transactions", post(create_transaction))
        .route("/api/transactions/seed", post(seed_transaction))
        .route("/api/transactions/sku/{sku}", get(get_transactions_by_sku))
        .route(
            "/api/transactions/sku/{sku}",
            delete(delete_transactions_by_sku),
        )
        .route("/api/transactions/{id}", get(get_transaction))
        .route("/api/transactions/{id}", put(update_transaction))
        .route("/api/transactions/{id}", delete(delete_transaction))
        .layer(Extension(app_state.di_container.transaction_query.clone()))
        .layer(Extension(app_state.di_container.transaction_command.clone()))
}
