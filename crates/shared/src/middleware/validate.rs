use crate::errors::HttpError;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// JSON extractor that runs the request DTO through its `validator`
/// schema before the handler sees it. Schema failures become a 400
/// carrying the joined field messages.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| HttpError::BadRequest(format_validation_errors(&errors)))?;

        Ok(Self(value))
    }
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| match error.code.as_ref() {
                    "length" => "Invalid length".to_string(),
                    "range" => "Value out of range".to_string(),
                    _ => format!("Invalid {field}"),
                });
            messages.push(format!("{field}: {message}"));
        }
    }

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}
