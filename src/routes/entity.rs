//! Entity CRUD routes: `/{path}` and `/{path}/:id` for each entity.

use crate::entity::{Customer, Entity, Product};
use crate::handlers::entity::{create, delete as delete_handler, list, read};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{extract::FromRef, routing::get, Router};

pub fn resource_routes<E>() -> Router<AppState>
where
    E: Entity,
    CrudService<E>: FromRef<AppState>,
{
    Router::new()
        .route(&format!("/{}", E::PATH), get(list::<E>).post(create::<E>))
        .route(
            &format!("/{}/:id", E::PATH),
            get(read::<E>).delete(delete_handler::<E>),
        )
}

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .merge(resource_routes::<Customer>())
        .merge(resource_routes::<Product>())
        .with_state(state)
}
