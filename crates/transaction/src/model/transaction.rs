use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A signed stock movement for a sku. The monetary amount is not stored;
/// it is derived per read as quantity times the current unit price
/// fetched from the product service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdjustmentTransaction {
    pub id: Uuid,
    pub sku: String,
    #[sqlx(rename = "qty")]
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}
