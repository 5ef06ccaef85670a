use crate::{
    abstract_trait::{
        http_client::{DynCatalogHttpClient, DynTransactionHttpClient},
        product::service::{DynProductCommandService, DynProductQueryService},
    },
    http_client::{catalog::CatalogHttpClientService, transaction::TransactionHttpClientService},
    repository::{command::ProductCommandRepository, query::ProductQueryRepository},
    service::{
        command::{ProductCommandService, ProductCommandServiceDeps},
        query::ProductQueryService,
    },
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .finish()
    }
}

pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub http_client: reqwest::Client,
    pub transaction_service_url: String,
    pub catalog_base_url: String,
    pub catalog_api_key: String,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            pool,
            http_client,
            transaction_service_url,
            catalog_base_url,
            catalog_api_key,
        } = deps;

        let query_repo = Arc::new(ProductQueryRepository::new(pool.clone()));
        let command_repo = Arc::new(ProductCommandRepository::new(pool));

        let transaction_client: DynTransactionHttpClient = Arc::new(
            TransactionHttpClientService::new(http_client.clone(), transaction_service_url),
        );
        let catalog_client: DynCatalogHttpClient = Arc::new(CatalogHttpClientService::new(
            http_client,
            catalog_base_url,
            catalog_api_key,
        ));

        let product_query: DynProductQueryService = Arc::new(ProductQueryService::new(
            query_repo.clone(),
            transaction_client.clone(),
            registry,
        ));

        let product_command: DynProductCommandService = Arc::new(ProductCommandService::new(
            ProductCommandServiceDeps {
                query: query_repo,
                command: command_repo,
                transaction_client,
                catalog_client,
            },
            registry,
        ));

        Self {
            product_query,
            product_command,
        }
    }
}
