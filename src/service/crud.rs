//! Generic CRUD delegation. One instantiation per entity; bindings differ only in the
//! repository they are constructed with.

use crate::entity::{Customer, Entity, Product};
use crate::error::AppError;
use crate::repository::Repository;
use std::sync::Arc;

pub struct CrudService<E> {
    repository: Arc<dyn Repository<E>>,
}

pub type CustomerService = CrudService<Customer>;
pub type ProductService = CrudService<Product>;

impl<E> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        CrudService {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<E: Entity> CrudService<E> {
    pub fn new(repository: Arc<dyn Repository<E>>) -> Self {
        CrudService { repository }
    }

    /// Validate, then insert (no id) or update (id present). Returns the stored row.
    pub async fn save(&self, entity: E) -> Result<E, AppError> {
        entity.validate()?;
        let is_new = entity.id().is_none();
        let saved = self.repository.save(entity).await?;
        tracing::info!(resource = E::PATH, id = ?saved.id(), created = is_new, "saved");
        Ok(saved)
    }

    /// `Ok(None)` when no row has this id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<E>, AppError> {
        self.repository.find_by_id(id).await
    }

    pub async fn find_all(&self) -> Result<Vec<E>, AppError> {
        let rows = self.repository.find_all().await?;
        tracing::debug!(resource = E::PATH, count = rows.len(), "listed");
        Ok(rows)
    }

    /// Deleting an absent id is not an error.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete_by_id(id).await?;
        tracing::info!(resource = E::PATH, id, "deleted");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
