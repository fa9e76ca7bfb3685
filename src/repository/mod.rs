//! Persistence accessors: one repository per entity type.

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait Repository<E>: Send + Sync {
    /// Insert when `entity` has no id, otherwise update that row. Update of a missing id is `NotFound`.
    async fn save(&self, entity: E) -> Result<E, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<E>, AppError>;
    /// All rows ordered by id.
    async fn find_all(&self) -> Result<Vec<E>, AppError>;
    /// No-op when the id does not exist.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;

    /// Store reachability, used by readiness checks.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
