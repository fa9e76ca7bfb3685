use super::{BaseEntity, ColumnDef, Entity};
use crate::error::AppError;
use crate::service::validation::{max_length, non_blank, non_negative};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub base: BaseEntity,
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Product {
            base: BaseEntity::default(),
            name: name.into(),
            price,
        }
    }
}

impl Entity for Product {
    const TABLE: &'static str = "products";
    const PATH: &'static str = "products";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::required("name", "TEXT"),
        ColumnDef::required("price", "DOUBLE PRECISION"),
    ];

    fn base(&self) -> &BaseEntity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        &mut self.base
    }

    fn bind_columns<'q>(
        &'q self,
        query: QueryAs<'q, Postgres, Self, PgArguments>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query.bind(&self.name).bind(self.price)
    }

    fn validate(&self) -> Result<(), AppError> {
        non_blank("name", &self.name)?;
        max_length("name", &self.name, 255)?;
        non_negative("price", self.price)
    }
}
