use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllTransactions {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionRequest {
    #[validate(length(min = 1, message = "Sku is required"))]
    #[schema(example = "PCS-NUTRISARI-001")]
    pub sku: String,

    // negative quantities record stock-out movements
    #[schema(example = 10)]
    pub quantity: i64,
}

/// Partial update. Absent fields, an empty sku or a zero quantity keep
/// the stored value (the truthy guard applied by the use case). The
/// resulting balance is not re-validated.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTransactionRequest {
    #[serde(skip_deserializing)]
    pub id: Option<Uuid>,

    pub sku: Option<String>,
    pub quantity: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn create_request_accepts_negative_quantity() {
        let req = CreateTransactionRequest {
            sku: "PCS-NUTRISARI-001".into(),
            quantity: -5,
        };

        assert!(req.validate().is_ok());
    }

    #[test]
    fn create_request_rejects_empty_sku() {
        let req = CreateTransactionRequest {
            sku: "".into(),
            quantity: 10,
        };

        let err = req.validate().unwrap_err();
        assert!(err.field_errors().contains_key("sku"));
    }
}
