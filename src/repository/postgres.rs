//! sqlx-backed repository. All SQL is generated from the entity's column mapping.

use super::Repository;
use crate::entity::Entity;
use crate::error::AppError;
use crate::sql;
use async_trait::async_trait;
use sqlx::PgPool;
use std::marker::PhantomData;

pub struct PgRepository<E> {
    pool: PgPool,
    schema: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgRepository<E> {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgRepository {
            pool,
            schema: schema.into(),
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for PgRepository<E> {
    fn clone(&self) -> Self {
        PgRepository {
            pool: self.pool.clone(),
            schema: self.schema.clone(),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for PgRepository<E> {
    async fn save(&self, entity: E) -> Result<E, AppError> {
        match entity.id() {
            None => {
                let q = sql::insert::<E>(&self.schema);
                tracing::debug!(sql = %q, "query");
                let row = entity
                    .bind_columns(sqlx::query_as::<_, E>(&q))
                    .fetch_one(&self.pool)
                    .await?;
                Ok(row)
            }
            Some(id) => {
                let q = sql::update_by_id::<E>(&self.schema);
                tracing::debug!(sql = %q, id, "query");
                let row = entity
                    .bind_columns(sqlx::query_as::<_, E>(&q))
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
                row.ok_or_else(|| AppError::NotFound(format!("{}/{}", E::PATH, id)))
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, AppError> {
        let q = sql::select_by_id::<E>(&self.schema);
        tracing::debug!(sql = %q, id, "query");
        let row = sqlx::query_as::<_, E>(&q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<E>, AppError> {
        let q = sql::select_all::<E>(&self.schema);
        tracing::debug!(sql = %q, "query");
        let rows = sqlx::query_as::<_, E>(&q).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let q = sql::delete_by_id::<E>(&self.schema);
        tracing::debug!(sql = %q, id, "query");
        let result = sqlx::query(&q).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            tracing::debug!(table = E::TABLE, id, "delete of absent row");
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
