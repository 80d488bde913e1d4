use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tracing::info;

use crate::api::rest::routes;
use crate::config::StoreConfig;
use crate::domain::service::Service;
use crate::infra::storage::{
    DocumentClockInRepository, DocumentCollection, DocumentItemsRepository, InMemoryCollection,
    MongoStore,
};

/// Wiring of store, service and REST routes.
pub struct StockroomModule {
    service: Arc<Service>,
}

impl StockroomModule {
    /// Connect to the configured document store and verify it is reachable.
    ///
    /// # Errors
    /// Fails if the connection string is invalid or the server does not answer a ping.
    pub async fn connect(cfg: &StoreConfig) -> anyhow::Result<Self> {
        info!("Initializing stockroom module");

        let store = MongoStore::connect(cfg)
            .await
            .context("failed to create document store client")?;
        store
            .ping()
            .await
            .with_context(|| format!("document store at '{}' is unreachable", cfg.uri))?;

        let module = Self::from_collections(
            Arc::new(store.collection(&cfg.items_collection)),
            Arc::new(store.collection(&cfg.clock_in_collection)),
        );
        info!("Stockroom module initialized");
        Ok(module)
    }

    /// Process-local store; contents are lost on exit.
    #[must_use]
    pub fn in_memory() -> Self {
        info!("Initializing stockroom module with in-memory store");
        Self::from_collections(
            Arc::new(InMemoryCollection::new()),
            Arc::new(InMemoryCollection::new()),
        )
    }

    #[must_use]
    pub fn from_collections(
        items: Arc<dyn DocumentCollection>,
        clock_ins: Arc<dyn DocumentCollection>,
    ) -> Self {
        let service = Service::new(
            Arc::new(DocumentItemsRepository::new(items)),
            Arc::new(DocumentClockInRepository::new(clock_ins)),
        );
        Self {
            service: Arc::new(service),
        }
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// Router serving `/items` and `/clock-in`.
    #[must_use]
    pub fn router(&self) -> Router {
        info!("Registering stockroom REST routes");
        routes::register_routes(Router::new(), self.service())
    }
}
