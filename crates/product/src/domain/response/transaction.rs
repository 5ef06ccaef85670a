use serde::{Deserialize, Serialize};

/// Adjustment transaction record as serialized by the transaction service.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TransactionResponse {
    pub id: String,
    pub sku: String,
    pub quantity: i64,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(rename = "created_at")]
    pub created_at: String,
}
