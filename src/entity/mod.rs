//! Persisted records and the column mapping the repository generates SQL from.

mod customer;
mod product;

pub use customer::Customer;
pub use product::Product;

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

/// Store-assigned primary key column. Every entity table has it.
pub const ID_COLUMN: &str = "id";
/// Store-assigned insert timestamp column.
pub const CREATED_AT_COLUMN: &str = "created_at";

/// One writable column of an entity table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    /// PostgreSQL type used in CREATE TABLE.
    pub pg_type: &'static str,
    pub nullable: bool,
}

impl ColumnDef {
    pub const fn required(name: &'static str, pg_type: &'static str) -> Self {
        ColumnDef { name, pg_type, nullable: false }
    }

    pub const fn optional(name: &'static str, pg_type: &'static str) -> Self {
        ColumnDef { name, pg_type, nullable: true }
    }
}

/// Identity shared by all entities. Both fields are assigned by the store on insert;
/// `created_at` is never read from request bodies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BaseEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A record persisted as one row of `TABLE` and exposed under `/{PATH}`.
///
/// `COLUMNS` lists the writable columns in the order `bind_columns` binds them;
/// `id` and `created_at` are implicit.
pub trait Entity:
    Clone + Send + Sync + Unpin + Serialize + DeserializeOwned + for<'r> FromRow<'r, PgRow> + 'static
{
    const TABLE: &'static str;
    const PATH: &'static str;
    const COLUMNS: &'static [ColumnDef];

    fn base(&self) -> &BaseEntity;

    fn base_mut(&mut self) -> &mut BaseEntity;

    /// Bind every column of `COLUMNS`, in order, onto `query`.
    fn bind_columns<'q>(
        &'q self,
        query: QueryAs<'q, Postgres, Self, PgArguments>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments>;

    fn validate(&self) -> Result<(), AppError>;

    fn id(&self) -> Option<i64> {
        self.base().id
    }
}
