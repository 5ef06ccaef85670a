use crate::model::transaction::AdjustmentTransaction as TransactionModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TransactionResponse {
    pub id: String,
    pub sku: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(rename = "created_at")]
    pub created_at: String,
}

impl From<TransactionModel> for TransactionResponse {
    fn from(value: TransactionModel) -> Self {
        TransactionResponse {
            id: value.id.to_string(),
            sku: value.sku,
            quantity: value.quantity,
            amount: None,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn unset_amount_is_dropped_from_json() {
        let response = TransactionResponse::from(TransactionModel {
            id: Uuid::new_v4(),
            sku: "PCS-NUTRISARI-001".into(),
            quantity: 10,
            created_at: Utc::now(),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("amount").is_none());
        assert_eq!(json["quantity"], 10);
    }
}
