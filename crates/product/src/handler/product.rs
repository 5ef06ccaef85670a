use crate::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    domain::{
        requests::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
        response::{
            api::{ApiResponse, ApiResponsePagination},
            product::{ProductResponse, ProductStockResponse},
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
    path = "/api/products",
    tag = "Product",
    params(FindAllProducts),
    responses(
        (status = 200, description = "List of products with live stock", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 400, description = "Invalid page", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with live stock", body = ApiResponse<ProductStockResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/sku/{sku}",
    tag = "Product",
    params(("sku" = String, Path, description = "Product sku")),
    responses(
        (status = 200, description = "Product with live stock", body = ApiResponse<ProductStockResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_product_by_sku(
    Extension(service): Extension<DynProductQueryService>,
    Path(sku): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_sku(&sku).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Product",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Created product", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Sku already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    ValidatedJson(body): ValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_product(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 409, description = "Sku already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<Uuid>,
    ValidatedJson(mut body): ValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    body.id = Some(id);

    let response = service.update_product(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deleted product", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_product(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products/init",
    tag = "Product",
    responses(
        (status = 200, description = "Catalog seeded from the external marketplace", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn init_products(
    Extension(service): Extension<DynProductCommandService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.init_products().await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/products", get(get_products))
        .route("/api/products", post(create_product))
        .route("/api/products/init", post(init_products))
        .route("/api/products/sku/{sku}", get(get_product_by_sku))
        .route("/api/products/{id}", get(get_product))
        .route("/api/products/{id}", put(update_product))
        .route("/api/products/{id}", delete(delete_product))
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.product_command.clone()))
}
