use crate::catalog::{load_catalog, Catalog, CatalogSource};
use crate::store::{InteractionState, Policy};
use std::{sync::Arc, time::Duration};
use tokio::sync::{Mutex, RwLock};
use tracing::error;

#[derive(Debug, Clone)]
pub enum CatalogStatus {
    Loading,
    Ready(Catalog),
    Failed(String),
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<CatalogStatus>>,
    pub interaction: Arc<Mutex<InteractionState>>,
}

impl AppState {
    pub fn new(policy: Policy) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(CatalogStatus::Loading)),
            interaction: Arc::new(Mutex::new(InteractionState::new(policy))),
        }
    }

    /// Loads the catalog once and publishes the result. Failures are kept for display, never retried.
    pub async fn load(&self, source: &CatalogSource, timeout: Duration) {
        let status = match load_catalog(source, timeout).await {
            Ok(catalog) => CatalogStatus::Ready(catalog),
            Err(err) => {
                error!("failed to load catalog: {err}");
                CatalogStatus::Failed(err.to_string())
            }
        };
        *self.catalog.write().await = status;
    }
}
