use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Nutrisari Jeruk Peras")]
    pub name: String,

    #[validate(length(min = 1, message = "Sku is required"))]
    #[schema(example = "PCS-NUTRISARI-001")]
    pub sku: String,

    // an empty image URL is allowed
    #[schema(example = "https://cdn.example.com/nutrisari.jpg")]
    pub image: String,

    #[schema(example = 1500.0)]
    pub price: f64,

    pub description: Option<String>,
}

/// Partial update. Fields left out, or carrying an empty/zero value,
/// keep their stored value (the truthy guard applied by the use case).
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(skip_deserializing)]
    pub id: Option<Uuid>,

    pub name: Option<String>,
    pub sku: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn create_request_accepts_valid_input() {
        let req = CreateProductRequest {
            name: "Nutrisari Jeruk Peras".into(),
            sku: "PCS-NUTRISARI-001".into(),
            image: "".into(),
            price: 1500.0,
            description: None,
        };

        assert!(req.validate().is_ok());
    }

    #[test]
    fn create_request_rejects_missing_sku() {
        let req = CreateProductRequest {
            name: "Nutrisari Jeruk Peras".into(),
            sku: "".into(),
            image: "".into(),
            price: 1500.0,
            description: None,
        };

        let err = req.validate().unwrap_err();
        assert!(err.field_errors().contains_key("sku"));
    }

    #[test]
    fn find_all_defaults_page_to_one() {
        let req: FindAllProducts = serde_json::from_str("{}").unwrap();
        assert_eq!(req.page, 1);
    }
}
