use std::sync::Arc;

use crate::category_client::CategoryClient;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The record store boundary. Postgres-backed in production, in-memory in
    /// tests — the insight pipeline itself never touches storage directly.
    pub store: Arc<dyn RecordStore>,
    pub category: CategoryClient,
}
