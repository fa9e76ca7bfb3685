//! crud-service: customer and product CRUD over REST, backed by PostgreSQL.

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Settings, StoreKind};
pub use entity::{BaseEntity, Customer, Entity, Product};
pub use error::{AppError, ConfigError};
pub use repository::{MemoryRepository, PgRepository, Repository};
pub use response::AbsentPolicy;
pub use routes::{app, common_routes, entity_routes, resource_routes};
pub use service::{CrudService, CustomerService, ProductService};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_tables};
