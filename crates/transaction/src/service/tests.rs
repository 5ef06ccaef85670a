use crate::{
    abstract_trait::{
        http_client::ProductHttpClientTrait,
        transaction::{
            repository::{TransactionCommandRepositoryTrait, TransactionQueryRepositoryTrait},
            service::{TransactionCommandServiceTrait, TransactionQueryServiceTrait},
        },
    },
    domain::{
        requests::transaction::{
            CreateTransactionRequest, FindAllTransactions, UpdateTransactionRequest,
        },
        response::product::ProductResponse,
    },
    model::transaction::AdjustmentTransaction as TransactionModel,
    repository::TRANSACTION_PAGE_SIZE,
    service::{command::TransactionCommandService, query::TransactionQueryService},
};
use async_trait::async_trait;
use chrono::Utc;
use prometheus_client::registry::Registry;
use shared::errors::{HttpClientError, RepositoryError, ServiceError};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct InMemoryTransactionStore {
    transactions: Mutex<Vec<TransactionModel>>,
}

struct InMemoryQueryRepository {
    store: Arc<InMemoryTransactionStore>,
}

#[async_trait]
impl TransactionQueryRepositoryTrait for InMemoryQueryRepository {
    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.store.transactions.lock().unwrap().len() as i64)
    }

    async fn find_all(&self, page: i64) -> Result<Vec<TransactionModel>, RepositoryError> {
        let transactions = self.store.transactions.lock().unwrap();
        let offset = ((page - 1).max(0) * TRANSACTION_PAGE_SIZE) as usize;

        Ok(transactions
            .iter()
            .skip(offset)
            .take(TRANSACTION_PAGE_SIZE as usize)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TransactionModel>, RepositoryError> {
        let transactions = self.store.transactions.lock().unwrap();
        Ok(transactions.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Vec<TransactionModel>, RepositoryError> {
        let transactions = self.store.transactions.lock().unwrap();
        Ok(transactions
            .iter()
            .filter(|t| t.sku == sku)
            .cloned()
            .collect())
    }
}

struct InMemoryCommandRepository {
    store: Arc<InMemoryTransactionStore>,
}

#[async_trait]
impl TransactionCommandRepositoryTrait for InMemoryCommandRepository {
    async fn create(
        &self,
        transaction: &TransactionModel,
    ) -> Result<TransactionModel, RepositoryError> {
        self.store
            .transactions
            .lock()
            .unwrap()
            .push(transaction.clone());
        Ok(transaction.clone())
    }

    async fn update(
        &self,
        transaction: &TransactionModel,
    ) -> Result<TransactionModel, RepositoryError> {
        let mut transactions = self.store.transactions.lock().unwrap();

        let existing = transactions
            .iter_mut()
            .find(|t| t.id == transaction.id)
            .ok_or(RepositoryError::NotFound)?;

        *existing = transaction.clone();
        Ok(transaction.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut transactions = self.store.transactions.lock().unwrap();
        let before = transactions.len();

        transactions.retain(|t| t.id != id);

        if transactions.len() == before {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_by_sku(&self, sku: &str) -> Result<(), RepositoryError> {
        self.store
            .transactions
            .lock()
            .unwrap()
            .retain(|t| t.sku != sku);
        Ok(())
    }
}

struct FakeProductClient {
    price: f64,
    unavailable: bool,
}

impl Default for FakeProductClient {
    fn default() -> Self {
        Self {
            price: 1500.0,
            unavailable: false,
        }
    }
}

#[async_trait]
impl ProductHttpClientTrait for FakeProductClient {
    async fn get_product(&self, sku: &str) -> Result<ProductResponse, HttpClientError> {
        if self.unavailable {
            return Err(HttpClientError::MissingData(
                "product service unavailable".into(),
            ));
        }

        let now = Utc::now().to_rfc3339();
        Ok(ProductResponse {
            id: Uuid::new_v4().to_string(),
            name: format!("Product {sku}"),
            sku: sku.to_string(),
            image: "".into(),
            price: self.price,
            stock: None,
            created_at: now.clone(),
            updated_at: now,
        })
    }
}

fn adjustment(sku: &str, quantity: i64) -> TransactionModel {
    TransactionModel {
        id: Uuid::new_v4(),
        sku: sku.to_string(),
        quantity,
        created_at: Utc::now(),
    }
}

struct Harness {
    store: Arc<InMemoryTransactionStore>,
    query_service: TransactionQueryService,
    command_service: TransactionCommandService,
}

fn harness_with(product_client: FakeProductClient) -> Harness {
    let store = Arc::new(InMemoryTransactionStore::default());

    let query_repo = Arc::new(InMemoryQueryRepository {
        store: store.clone(),
    });
    let command_repo = Arc::new(InMemoryCommandRepository {
        store: store.clone(),
    });

    let mut registry = Registry::default();

    let query_service = TransactionQueryService::new(
        query_repo.clone(),
        Arc::new(product_client),
        &mut registry,
    );

    let command_service = TransactionCommandService::new(query_repo, command_repo, &mut registry);

    Harness {
        store,
        query_service,
        command_service,
    }
}

fn harness() -> Harness {
    harness_with(FakeProductClient::default())
}

#[tokio::test]
async fn create_for_unknown_sku_fails() {
    let h = harness();

    let err = h
        .command_service
        .create_transaction(&CreateTransactionRequest {
            sku: "PCS-NUTRISARI-001".into(),
            quantity: 10,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::SkuNotFound(_)));
}

#[tokio::test]
async fn create_rejects_negative_resulting_stock() {
    let h = harness();

    h.store
        .transactions
        .lock()
        .unwrap()
        .push(adjustment("PCS-NUTRISARI-001", 10));

    let err = h
        .command_service
        .create_transaction(&CreateTransactionRequest {
            sku: "PCS-NUTRISARI-001".into(),
            quantity: -15,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::StockNotAvailable(_)));
}

#[tokio::test]
async fn create_within_balance_succeeds() {
    let h = harness();

    h.store
        .transactions
        .lock()
        .unwrap()
        .push(adjustment("PCS-NUTRISARI-001", 10));

    let response = h
        .command_service
        .create_transaction(&CreateTransactionRequest {
            sku: "PCS-NUTRISARI-001".into(),
            quantity: -5,
        })
        .await
        .unwrap();

    // amount is left unset on writes
    assert!(response.data.amount.is_none());

    let balance: i64 = h
        .store
        .transactions
        .lock()
        .unwrap()
        .iter()
        .map(|t| t.quantity)
        .sum();
    assert_eq!(balance, 5);
}

#[tokio::test]
async fn seed_bypasses_known_sku_guard() {
    let h = harness();

    let response = h
        .command_service
        .seed_transaction(&CreateTransactionRequest {
            sku: "SKU-BRAND-NEW".into(),
            quantity: 7,
        })
        .await
        .unwrap();

    assert_eq!(response.data.quantity, 7);
    assert_eq!(h.store.transactions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn get_by_id_derives_amount_from_live_price() {
    let h = harness();

    let transaction = adjustment("PCS-NUTRISARI-001", 3);
    let id = transaction.id;
    h.store.transactions.lock().unwrap().push(transaction);

    let response = h.query_service.find_by_id(id).await.unwrap();

    assert_eq!(response.data.amount, Some(4500.0));
}

#[tokio::test]
async fn get_by_id_unknown_is_not_found() {
    let h = harness();

    let err = h
        .query_service
        .find_by_id(Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::TransactionNotFound(_)));
}

#[tokio::test]
async fn get_by_sku_returns_empty_history_as_success() {
    let h = harness();

    let response = h.query_service.find_by_sku("UNKNOWN-SKU").await.unwrap();

    assert!(response.data.is_empty());
}

#[tokio::test]
async fn list_enriches_amounts_and_paginates() {
    let h = harness();

    for i in 0..12 {
        h.store
            .transactions
            .lock()
            .unwrap()
            .push(adjustment(&format!("SKU-{i:03}"), 2));
    }

    let page_one = h
        .query_service
        .find_all(&FindAllTransactions { page: 1 })
        .await
        .unwrap();

    assert_eq!(page_one.data.len(), 10);
    assert_eq!(page_one.pagination.total_page, 2);
    assert!(page_one.data.iter().all(|t| t.amount == Some(3000.0)));

    let page_two = h
        .query_service
        .find_all(&FindAllTransactions { page: 2 })
        .await
        .unwrap();
    assert_eq!(page_two.data.len(), 2);
}

#[tokio::test]
async fn list_fails_when_product_service_is_down() {
    let h = harness_with(FakeProductClient {
        unavailable: true,
        ..Default::default()
    });

    h.store
        .transactions
        .lock()
        .unwrap()
        .push(adjustment("PCS-NUTRISARI-001", 1));

    let err = h
        .query_service
        .find_all(&FindAllTransactions { page: 1 })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Client(_)));
}

#[tokio::test]
async fn update_ignores_zero_quantity_and_empty_sku() {
    let h = harness();

    let transaction = adjustment("PCS-NUTRISARI-001", 10);
    let id = transaction.id;
    h.store.transactions.lock().unwrap().push(transaction);

    let response = h
        .command_service
        .update_transaction(&UpdateTransactionRequest {
            id: Some(id),
            sku: Some("".into()),
            quantity: Some(0),
        })
        .await
        .unwrap();

    assert_eq!(response.data.sku, "PCS-NUTRISARI-001");
    assert_eq!(response.data.quantity, 10);
}

#[tokio::test]
async fn update_applies_supplied_quantity() {
    let h = harness();

    let transaction = adjustment("PCS-NUTRISARI-001", 10);
    let id = transaction.id;
    h.store.transactions.lock().unwrap().push(transaction);

    let response = h
        .command_service
        .update_transaction(&UpdateTransactionRequest {
            id: Some(id),
            sku: None,
            quantity: Some(-4),
        })
        .await
        .unwrap();

    assert_eq!(response.data.quantity, -4);
}

#[tokio::test]
async fn delete_returns_pre_deletion_serialization() {
    let h = harness();

    let transaction = adjustment("PCS-NUTRISARI-001", 10);
    let id = transaction.id;
    h.store.transactions.lock().unwrap().push(transaction);

    let response = h.command_service.delete_transaction(id).await.unwrap();

    assert_eq!(response.data.quantity, 10);
    assert!(h.store.transactions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delete_by_sku_reports_removed_rows() {
    let h = harness();

    h.store
        .transactions
        .lock()
        .unwrap()
        .push(adjustment("PCS-NUTRISARI-001", 10));
    h.store
        .transactions
        .lock()
        .unwrap()
        .push(adjustment("PCS-NUTRISARI-001", -3));
    h.store
        .transactions
        .lock()
        .unwrap()
        .push(adjustment("OTHER-SKU", 1));

    let response = h
        .command_service
        .delete_transactions_by_sku("PCS-NUTRISARI-001")
        .await
        .unwrap();

    assert_eq!(response.data.len(), 2);
    assert_eq!(h.store.transactions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_by_sku_with_no_rows_is_a_noop_success() {
    let h = harness();

    let response = h
        .command_service
        .delete_transactions_by_sku("UNKNOWN-SKU")
        .await
        .unwrap();

    assert!(response.data.is_empty());
}
