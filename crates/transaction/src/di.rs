use crate::{
    abstract_trait::{
        http_client::DynProductHttpClient,
        transaction::service::{DynTransactionCommandService, DynTransactionQueryService},
    },
    http_client::product::ProductHttpClientService,
    repository::{command::TransactionCommandRepository, query::TransactionQueryRepository},
    service::{command::TransactionCommandService, query::TransactionQueryService},
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub transaction_query: DynTransactionQueryService,
    pub transaction_command: DynTransactionCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("transaction_query", &"TransactionQueryService")
            .field("transaction_command", &"TransactionCommandService")
            .finish()
    }
}

pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub http_client: reqwest::Client,
    pub product_service_url: String,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            pool,
            http_client,
            product_service_url,
        } = deps;

        let query_repo = Arc::new(TransactionQueryRepository::new(pool.clone()));
        let command_repo = Arc::new(TransactionCommandRepository::new(pool));

        let product_client: DynProductHttpClient = Arc::new(ProductHttpClientService::new(
            http_client,
            product_service_url,
        ));

        let transaction_query: DynTransactionQueryService = Arc::new(
            TransactionQueryService::new(query_repo.clone(), product_client, registry),
        );

        let transaction_command: DynTransactionCommandService = Arc::new(
            TransactionCommandService::new(query_repo, command_repo, registry),
        );

        Self {
            transaction_query,
            transaction_command,
        }
    }
}
