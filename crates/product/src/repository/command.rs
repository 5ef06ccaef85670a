use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create(&self, product: &ProductModel) -> Result<ProductModel, RepositoryError> {
        info!("📦 Inserting product with sku {}", product.sku);

        let created = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (id, name, sku, image, price, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, sku, image, price, description, created_at, updated_at, deleted_at
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.sku)
        .bind(&product.image)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return RepositoryError::AlreadyExists(product.sku.clone());
            }
            error!("❌ Failed to insert product: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(created)
    }

    async fn update(&self, product: &ProductModel) -> Result<ProductModel, RepositoryError> {
        info!("✏️ Updating product {}", product.id);

        let updated = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name = $2, sku = $3, image = $4, price = $5, description = $6, updated_at = $7
            WHERE id = $1
            RETURNING id, name, sku, image, price, description, created_at, updated_at, deleted_at
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.sku)
        .bind(&product.image)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.updated_at)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update product {}: {e:?}", product.id);
            RepositoryError::from(e)
        })?;

        updated.ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting product {id}");

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
