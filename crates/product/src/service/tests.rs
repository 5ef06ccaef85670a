use crate::{
    abstract_trait::{
        http_client::{CatalogHttpClientTrait, TransactionHttpClientTrait},
        product::{
            repository::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
            service::{ProductCommandServiceTrait, ProductQueryServiceTrait},
        },
    },
    domain::{
        requests::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
        response::{catalog::CatalogProductRecord, transaction::TransactionResponse},
    },
    model::product::Product as ProductModel,
    repository::PRODUCT_PAGE_SIZE,
    service::{
        command::{ProductCommandService, ProductCommandServiceDeps},
        query::ProductQueryService,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use prometheus_client::registry::Registry;
use shared::errors::{HttpClientError, RepositoryError, ServiceError};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use uuid::Uuid;

#[derive(Default)]
struct InMemoryProductStore {
    products: Mutex<Vec<ProductModel>>,
}

struct InMemoryQueryRepository {
    store: Arc<InMemoryProductStore>,
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryQueryRepository {
    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.store.products.lock().unwrap().len() as i64)
    }

    async fn find_all(&self, page: i64) -> Result<Vec<ProductModel>, RepositoryError> {
        let products = self.store.products.lock().unwrap();
        let offset = ((page - 1).max(0) * PRODUCT_PAGE_SIZE) as usize;

        Ok(products
            .iter()
            .skip(offset)
            .take(PRODUCT_PAGE_SIZE as usize)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductModel>, RepositoryError> {
        let products = self.store.products.lock().unwrap();
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<ProductModel>, RepositoryError> {
        let products = self.store.products.lock().unwrap();
        Ok(products.iter().find(|p| p.sku == sku).cloned())
    }
}

struct InMemoryCommandRepository {
    store: Arc<InMemoryProductStore>,
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryCommandRepository {
    async fn create(&self, product: &ProductModel) -> Result<ProductModel, RepositoryError> {
        let mut products = self.store.products.lock().unwrap();

        if products.iter().any(|p| p.sku == product.sku) {
            return Err(RepositoryError::AlreadyExists(product.sku.clone()));
        }

        products.push(product.clone());
        Ok(product.clone())
    }

    async fn update(&self, product: &ProductModel) -> Result<ProductModel, RepositoryError> {
        let mut products = self.store.products.lock().unwrap();

        let existing = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(RepositoryError::NotFound)?;

        *existing = product.clone();
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut products = self.store.products.lock().unwrap();
        let before = products.len();

        products.retain(|p| p.id != id);

        if products.len() == before {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[derive(Default)]
struct FakeTransactionClient {
    quantities: Mutex<HashMap<String, Vec<i64>>>,
    seeded: Mutex<Vec<(String, i64)>>,
    unavailable: bool,
}

#[async_trait]
impl TransactionHttpClientTrait for FakeTransactionClient {
    async fn get_transactions(
        &self,
        sku: &str,
    ) -> Result<Vec<TransactionResponse>, HttpClientError> {
        if self.unavailable {
            return Err(HttpClientError::MissingData(
                "transaction service unavailable".into(),
            ));
        }

        let quantities = self.quantities.lock().unwrap();

        Ok(quantities
            .get(sku)
            .map(|entries| {
                entries
                    .iter()
                    .map(|quantity| TransactionResponse {
                        id: Uuid::new_v4().to_string(),
                        sku: sku.to_string(),
                        quantity: *quantity,
                        amount: None,
                        created_at: Utc::now().to_rfc3339(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_transaction(&self, sku: &str, quantity: i64) -> Result<(), HttpClientError> {
        self.quantities
            .lock()
            .unwrap()
            .entry(sku.to_string())
            .or_default()
            .push(quantity);
        self.seeded
            .lock()
            .unwrap()
            .push((sku.to_string(), quantity));
        Ok(())
    }

    async fn delete_transactions_by_sku(&self, sku: &str) -> Result<(), HttpClientError> {
        self.quantities.lock().unwrap().remove(sku);
        Ok(())
    }
}

struct FakeCatalogClient {
    records: Vec<CatalogProductRecord>,
}

#[async_trait]
impl CatalogHttpClientTrait for FakeCatalogClient {
    async fn get_products(&self) -> Result<Vec<CatalogProductRecord>, HttpClientError> {
        Ok(self.records.clone())
    }
}

fn sample_product(sku: &str) -> ProductModel {
    let now = Utc::now();
    ProductModel {
        id: Uuid::new_v4(),
        name: format!("Product {sku}"),
        sku: sku.to_string(),
        image: "".into(),
        price: 1500.0,
        description: Some("Minuman serbuk".into()),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

struct Harness {
    store: Arc<InMemoryProductStore>,
    transaction_client: Arc<FakeTransactionClient>,
    query_service: ProductQueryService,
    command_service: ProductCommandService,
}

fn harness_with(transaction_client: FakeTransactionClient, catalog: FakeCatalogClient) -> Harness {
    let store = Arc::new(InMemoryProductStore::default());
    let transaction_client = Arc::new(transaction_client);

    let query_repo = Arc::new(InMemoryQueryRepository {
        store: store.clone(),
    });
    let command_repo = Arc::new(InMemoryCommandRepository {
        store: store.clone(),
    });

    let mut registry = Registry::default();

    let query_service = ProductQueryService::new(
        query_repo.clone(),
        transaction_client.clone(),
        &mut registry,
    );

    let command_service = ProductCommandService::new(
        ProductCommandServiceDeps {
            query: query_repo,
            command: command_repo,
            transaction_client: transaction_client.clone(),
            catalog_client: Arc::new(catalog),
        },
        &mut registry,
    );

    Harness {
        store,
        transaction_client,
        query_service,
        command_service,
    }
}

fn harness() -> Harness {
    harness_with(
        FakeTransactionClient::default(),
        FakeCatalogClient { records: vec![] },
    )
}

#[tokio::test]
async fn list_paginates_by_ten() {
    let h = harness();

    for i in 0..25 {
        h.store
            .products
            .lock()
            .unwrap()
            .push(sample_product(&format!("SKU-{i:03}")));
    }

    let page_one = h
        .query_service
        .find_all(&FindAllProducts { page: 1 })
        .await
        .unwrap();
    assert_eq!(page_one.data.len(), 10);
    assert_eq!(page_one.pagination.total_data, 25);
    assert_eq!(page_one.pagination.total_page, 3);

    let page_three = h
        .query_service
        .find_all(&FindAllProducts { page: 3 })
        .await
        .unwrap();
    assert_eq!(page_three.data.len(), 5);
}

#[tokio::test]
async fn list_rejects_page_below_one() {
    let h = harness();

    let err = h
        .query_service
        .find_all(&FindAllProducts { page: 0 })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn list_fails_when_transaction_service_is_down() {
    let h = harness_with(
        FakeTransactionClient {
            unavailable: true,
            ..Default::default()
        },
        FakeCatalogClient { records: vec![] },
    );

    h.store
        .products
        .lock()
        .unwrap()
        .push(sample_product("PCS-NUTRISARI-001"));

    let err = h
        .query_service
        .find_all(&FindAllProducts { page: 1 })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Client(_)));
}

#[tokio::test]
async fn get_by_id_sums_adjustments_into_stock() {
    let h = harness();

    let product = sample_product("PCS-NUTRISARI-001");
    let id = product.id;
    h.store.products.lock().unwrap().push(product);
    h.transaction_client
        .quantities
        .lock()
        .unwrap()
        .insert("PCS-NUTRISARI-001".into(), vec![10, -3, 2]);

    let response = h.query_service.find_by_id(id).await.unwrap();

    assert_eq!(response.data.stock, Some(9));
}

#[tokio::test]
async fn get_by_sku_unknown_is_not_found() {
    let h = harness();

    let err = h
        .query_service
        .find_by_sku("UNKNOWN-SKU")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::ProductNotFound(_)));
}

#[tokio::test]
async fn create_persists_and_serializes_description() {
    let h = harness();

    let response = h
        .command_service
        .create_product(&CreateProductRequest {
            name: "Nutrisari Jeruk Peras".into(),
            sku: "PCS-NUTRISARI-001".into(),
            image: "".into(),
            price: 1500.0,
            description: None,
        })
        .await
        .unwrap();

    assert_eq!(h.store.products.lock().unwrap().len(), 1);

    let json = serde_json::to_value(&response.data).unwrap();
    assert_eq!(json["name"], "Nutrisari Jeruk Peras");
    assert_eq!(json["sku"], "PCS-NUTRISARI-001");
    assert_eq!(json["price"], 1500.0);
    assert_eq!(json["description"], "");
    assert!(json.get("stock").is_none());

    // timestamps default to creation time, so updated_at never precedes created_at
    assert!(response.data.updated_at >= response.data.created_at);
}

#[tokio::test]
async fn create_with_existing_sku_conflicts() {
    let h = harness();

    h.store
        .products
        .lock()
        .unwrap()
        .push(sample_product("PCS-NUTRISARI-001"));

    let err = h
        .command_service
        .create_product(&CreateProductRequest {
            name: "Duplicate".into(),
            sku: "PCS-NUTRISARI-001".into(),
            image: "".into(),
            price: 2000.0,
            description: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::SkuAlreadyExists(_)));
}

#[tokio::test]
async fn update_ignores_zero_price() {
    let h = harness();

    let product = sample_product("PCS-NUTRISARI-001");
    let id = product.id;
    h.store.products.lock().unwrap().push(product);

    let response = h
        .command_service
        .update_product(&UpdateProductRequest {
            id: Some(id),
            name: Some("Renamed".into()),
            sku: None,
            image: None,
            price: Some(0.0),
            description: None,
        })
        .await
        .unwrap();

    assert_eq!(response.data.name, "Renamed");
    assert_eq!(response.data.price, 1500.0);
}

#[tokio::test]
async fn update_to_foreign_sku_conflicts() {
    let h = harness();

    let product = sample_product("SKU-A");
    let id = product.id;
    h.store.products.lock().unwrap().push(product);
    h.store.products.lock().unwrap().push(sample_product("SKU-B"));

    let err = h
        .command_service
        .update_product(&UpdateProductRequest {
            id: Some(id),
            name: None,
            sku: Some("SKU-B".into()),
            image: None,
            price: None,
            description: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::SkuAlreadyExists(_)));
}

#[tokio::test]
async fn delete_cascades_to_transaction_service() {
    let h = harness();

    let product = sample_product("PCS-NUTRISARI-001");
    let id = product.id;
    h.store.products.lock().unwrap().push(product);
    h.transaction_client
        .quantities
        .lock()
        .unwrap()
        .insert("PCS-NUTRISARI-001".into(), vec![10]);

    let response = h.command_service.delete_product(id).await.unwrap();

    assert_eq!(response.data.sku, "PCS-NUTRISARI-001");
    assert!(h.store.products.lock().unwrap().is_empty());
    assert!(
        h.transaction_client
            .get_transactions("PCS-NUTRISARI-001")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn delete_unknown_product_is_not_found() {
    let h = harness();

    let err = h
        .command_service
        .delete_product(Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::ProductNotFound(_)));
}

#[tokio::test]
async fn init_seeds_only_unknown_skus() {
    let record = |sku: &str, stock: i64| CatalogProductRecord {
        name: format!("Catalog {sku}"),
        sku: sku.to_string(),
        image: "".into(),
        price: 999.0,
        stock,
        description: Some("from marketplace".into()),
    };

    let h = harness_with(
        FakeTransactionClient::default(),
        FakeCatalogClient {
            records: vec![record("SKU-NEW", 7), record("SKU-OLD", 3)],
        },
    );

    h.store.products.lock().unwrap().push(sample_product("SKU-OLD"));

    let response = h.command_service.init_products().await.unwrap();

    // both external records are reported, with the external stock figures
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[0].stock, Some(7));
    assert_eq!(response.data[1].stock, Some(3));

    // but only the unknown sku was seeded and persisted
    assert_eq!(
        h.transaction_client.seeded.lock().unwrap().as_slice(),
        &[("SKU-NEW".to_string(), 7)]
    );
    assert_eq!(h.store.products.lock().unwrap().len(), 2);
}
