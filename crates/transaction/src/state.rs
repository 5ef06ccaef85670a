use crate::{
    config::Config,
    di::{DependenciesInject, DependenciesInjectDeps},
};
use anyhow::Result;
use prometheus_client::registry::Registry;
use shared::{
    config::ConnectionPool,
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    pub fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());

        let deps = DependenciesInjectDeps {
            pool,
            http_client: reqwest::Client::new(),
            product_service_url: config.product_service_url.clone(),
        };

        let di_container = DependenciesInject::new(deps, &mut registry);

        system_metrics.register(&mut registry);

        tokio::spawn(run_metrics_collector(system_metrics.clone()));

        Ok(Self {
            di_container,
            registry: Arc::new(Mutex::new(registry)),
            system_metrics,
        })
    }
}
