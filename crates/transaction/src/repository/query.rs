use crate::{
    abstract_trait::transaction::repository::TransactionQueryRepositoryTrait,
    model::transaction::AdjustmentTransaction as TransactionModel,
    repository::TRANSACTION_PAGE_SIZE,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct TransactionQueryRepository {
    db: ConnectionPool,
}

impl TransactionQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TransactionQueryRepositoryTrait for TransactionQueryRepository {
    async fn count(&self) -> Result<i64, RepositoryError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM adjustment_transactions")
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count transactions: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(total)
    }

    async fn find_all(&self, page: i64) -> Result<Vec<TransactionModel>, RepositoryError> {
        info!("🔍 Fetching transactions page {page}");

        let offset = (page - 1).max(0) * TRANSACTION_PAGE_SIZE;

        let transactions = sqlx::query_as::<_, TransactionModel>(
            r#"
            SELECT id, sku, qty, created_at
            FROM adjustment_transactions
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(TRANSACTION_PAGE_SIZE)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch transactions: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(transactions)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TransactionModel>, RepositoryError> {
        let transaction = sqlx::query_as::<_, TransactionModel>(
            r#"
            SELECT id, sku, qty, created_at
            FROM adjustment_transactions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch transaction by id {id}: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(transaction)
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Vec<TransactionModel>, RepositoryError> {
        let transactions = sqlx::query_as::<_, TransactionModel>(
            r#"
            SELECT id, sku, qty, created_at
            FROM adjustment_transactions
            WHERE sku = $1
            ORDER BY created_at
            "#,
        )
        .bind(sku)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch transactions by sku {sku}: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(transactions)
    }
}
