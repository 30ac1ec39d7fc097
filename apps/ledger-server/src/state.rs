//! # Application State
//!
//! Shared with every handler through axum's `State` extractor.
//!
//! ## Thread Safety
//! `LedgerService` holds a `Database`, whose `SqlitePool` is internally
//! synchronized. Cloning the state clones a pool handle, not the pool, so
//! handlers run concurrently without explicit locking.

use crate::service::LedgerService;

#[derive(Debug, Clone)]
pub struct AppState {
    pub service: LedgerService,
}

impl AppState {
    pub fn new(service: LedgerService) -> Self {
        AppState { service }
    }
}
