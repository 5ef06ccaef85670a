use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    model::product::Product as ProductModel, repository::PRODUCT_PAGE_SIZE,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn count(&self) -> Result<i64, RepositoryError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count products: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(total)
    }

    async fn find_all(&self, page: i64) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching products page {page}");

        let offset = (page - 1).max(0) * PRODUCT_PAGE_SIZE;

        let products = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, sku, image, price, description, created_at, updated_at, deleted_at
            FROM products
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(PRODUCT_PAGE_SIZE)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(products)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductModel>, RepositoryError> {
        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, sku, image, price, description, created_at, updated_at, deleted_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product by id {id}: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(product)
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<ProductModel>, RepositoryError> {
        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, sku, image, price, description, created_at, updated_at, deleted_at
            FROM products
            WHERE sku = $1
            "#,
        )
        .bind(sku)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product by sku {sku}: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(product)
    }
}
