//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::{Database, ProductStore};
use crate::services::{ProductManager, ProductService};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Product service
    pub product_service: Arc<dyn ProductService>,
    /// Database connection (health checks, shutdown)
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the product service to a store over the given database.
    pub fn from_database(database: Arc<Database>) -> Self {
        let store = Arc::new(ProductStore::new(database.get_connection()));
        let product_service = Arc::new(ProductManager::new(store));

        Self {
            product_service,
            database,
        }
    }
}
