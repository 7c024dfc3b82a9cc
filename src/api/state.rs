use crate::store::PostgresStore;
use std::sync::Arc;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool wrapper
    pub store: Arc<PostgresStore>,
}

impl AppState {
    pub fn new(store: Arc<PostgresStore>) -> Self {
        Self { store }
    }
}
