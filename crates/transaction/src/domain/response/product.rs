use serde::{Deserialize, Serialize};

/// Product record as serialized by the product service's by-sku read.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub image: String,
    pub price: f64,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(rename = "created_at")]
    pub created_at: String,
    #[serde(rename = "updated_at")]
    pub updated_at: String,
}
