use crate::errors::{error::ErrorResponse, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => HttpError::BadRequest(errors.join("; ")),

            ServiceError::ProductNotFound(msg) => {
                HttpError::NotFound(format!("Product not found: {msg}"))
            }
            ServiceError::TransactionNotFound(msg) => {
                HttpError::NotFound(format!("Adjustment transaction not found: {msg}"))
            }
            ServiceError::SkuNotFound(sku) => {
                HttpError::NotFound(format!("No adjustment transaction exists for sku {sku}"))
            }

            ServiceError::SkuAlreadyExists(sku) => {
                HttpError::Conflict(format!("A product with sku {sku} already exists"))
            }
            ServiceError::StockNotAvailable(sku) => {
                HttpError::BadRequest(format!("Stock not available for sku {sku}"))
            }

            ServiceError::Repo(err) => {
                error!("Repository failure: {err:?}");
                HttpError::Internal("Internal server error".into())
            }
            ServiceError::Client(err) => {
                error!("Downstream client failure: {err:?}");
                HttpError::Internal("Internal server error".into())
            }
            ServiceError::Internal(msg) => {
                error!("Internal failure: {msg}");
                HttpError::Internal("Internal server error".into())
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
        });

        (status, body).into_response()
    }
}
