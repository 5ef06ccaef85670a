use crate::{
    abstract_trait::transaction::repository::TransactionCommandRepositoryTrait,
    model::transaction::AdjustmentTransaction as TransactionModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct TransactionCommandRepository {
    db: ConnectionPool,
}

impl TransactionCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TransactionCommandRepositoryTrait for TransactionCommandRepository {
    async fn create(
        &self,
        transaction: &TransactionModel,
    ) -> Result<TransactionModel, RepositoryError> {
        info!(
            "📦 Inserting transaction for sku {} with quantity {}",
            transaction.sku, transaction.quantity
        );

        let created = sqlx::query_as::<_, TransactionModel>(
            r#"
            INSERT INTO adjustment_transactions (id, sku, qty, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, sku, qty, created_at
            "#,
        )
        .bind(transaction.id)
        .bind(&transaction.sku)
        .bind(transaction.quantity)
        .bind(transaction.created_at)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert transaction: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(created)
    }

    async fn update(
        &self,
        transaction: &TransactionModel,
    ) -> Result<TransactionModel, RepositoryError> {
        info!("✏️ Updating transaction {}", transaction.id);

        let updated = sqlx::query_as::<_, TransactionModel>(
            r#"
            UPDATE adjustment_transactions
            SET sku = $2, qty = $3
            WHERE id = $1
            RETURNING id, sku, qty, created_at
            "#,
        )
        .bind(transaction.id)
        .bind(&transaction.sku)
        .bind(transaction.quantity)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update transaction {}: {e:?}", transaction.id);
            RepositoryError::from(e)
        })?;

        updated.ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting transaction {id}");

        let result = sqlx::query("DELETE FROM adjustment_transactions WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete transaction {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_by_sku(&self, sku: &str) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting transactions for sku {sku}");

        sqlx::query("DELETE FROM adjustment_transactions WHERE sku = $1")
            .bind(sku)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete transactions for sku {sku}: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(())
    }
}
