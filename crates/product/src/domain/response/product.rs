use crate::model::product::Product as ProductModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Full projection: list, create, update and delete responses.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub image: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(rename = "created_at")]
    pub created_at: String,
    #[serde(rename = "updated_at")]
    pub updated_at: String,
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.id.to_string(),
            name: value.name,
            sku: value.sku,
            image: value.image,
            price: value.price,
            description: value.description,
            stock: None,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Stock projection: the by-id and by-sku reads omit the description.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductStockResponse {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub image: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(rename = "created_at")]
    pub created_at: String,
    #[serde(rename = "updated_at")]
    pub updated_at: String,
}

impl From<ProductModel> for ProductStockResponse {
    fn from(value: ProductModel) -> Self {
        ProductStockResponse {
            id: value.id.to_string(),
            name: value.name,
            sku: value.sku,
            image: value.image,
            price: value.price,
            stock: None,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_model() -> ProductModel {
        let now = Utc::now();
        ProductModel {
            id: Uuid::new_v4(),
            name: "Nutrisari Jeruk Peras".into(),
            sku: "PCS-NUTRISARI-001".into(),
            image: "".into(),
            price: 1500.0,
            description: Some("Minuman serbuk".into()),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn unset_stock_is_dropped_from_json() {
        let response = ProductResponse::from(sample_model());
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("stock").is_none());
        assert_eq!(json["description"], "Minuman serbuk");
    }

    #[test]
    fn stock_projection_has_no_description() {
        let mut response = ProductStockResponse::from(sample_model());
        response.stock = Some(9);
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("description").is_none());
        assert_eq!(json["stock"], 9);
    }
}
