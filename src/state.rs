//! Shared application state for all routes: one service per resource plus response settings.

use crate::entity::{Customer, Product};
use crate::repository::{MemoryRepository, PgRepository};
use crate::response::AbsentPolicy;
use crate::service::{CrudService, CustomerService, ProductService};
use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerService,
    pub products: ProductService,
    pub absent: AbsentPolicy,
}

impl AppState {
    /// Services backed by PostgreSQL tables in `schema`.
    pub fn postgres(pool: PgPool, schema: &str, absent: AbsentPolicy) -> Self {
        AppState {
            customers: CrudService::new(Arc::new(PgRepository::<Customer>::new(pool.clone(), schema))),
            products: CrudService::new(Arc::new(PgRepository::<Product>::new(pool, schema))),
            absent,
        }
    }

    /// Services backed by in-process maps; data is lost on restart.
    pub fn in_memory(absent: AbsentPolicy) -> Self {
        AppState {
            customers: CrudService::new(Arc::new(MemoryRepository::<Customer>::new())),
            products: CrudService::new(Arc::new(MemoryRepository::<Product>::new())),
            absent,
        }
    }
}

impl FromRef<AppState> for CustomerService {
    fn from_ref(state: &AppState) -> Self {
        state.customers.clone()
    }
}

impl FromRef<AppState> for ProductService {
    fn from_ref(state: &AppState) -> Self {
        state.products.clone()
    }
}

impl FromRef<AppState> for AbsentPolicy {
    fn from_ref(state: &AppState) -> Self {
        state.absent
    }
}
