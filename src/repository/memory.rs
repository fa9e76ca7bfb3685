//! In-process repository: rows in a BTreeMap keyed by id, ids from a counter that never reuses values.

use super::Repository;
use crate::entity::Entity;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

struct Table<E> {
    rows: BTreeMap<i64, E>,
    last_id: i64,
}

pub struct MemoryRepository<E> {
    table: RwLock<Table<E>>,
}

impl<E> MemoryRepository<E> {
    pub fn new() -> Self {
        MemoryRepository {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl<E> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn save(&self, mut entity: E) -> Result<E, AppError> {
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        match entity.id() {
            None => {
                table.last_id += 1;
                let id = table.last_id;
                let base = entity.base_mut();
                base.id = Some(id);
                base.created_at = Some(Utc::now());
                table.rows.insert(id, entity.clone());
                Ok(entity)
            }
            Some(id) => {
                let existing = table
                    .rows
                    .get_mut(&id)
                    .ok_or_else(|| AppError::NotFound(format!("{}/{}", E::PATH, id)))?;
                entity.base_mut().created_at = existing.base().created_at;
                *existing = entity.clone();
                Ok(entity)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, AppError> {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<E>, AppError> {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        Ok(table.rows.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        if table.rows.remove(&id).is_none() {
            tracing::debug!(table = E::TABLE, id, "delete of absent row");
        }
        Ok(())
    }
}
