use super::{BaseEntity, ColumnDef, Entity};
use crate::error::AppError;
use crate::service::validation::{max_length, non_blank, optional_email};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub base: BaseEntity,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Customer {
            base: BaseEntity::default(),
            name: name.into(),
            email: None,
            phone: None,
        }
    }
}

impl Entity for Customer {
    const TABLE: &'static str = "customers";
    const PATH: &'static str = "customers";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::required("name", "TEXT"),
        ColumnDef::optional("email", "TEXT"),
        ColumnDef::optional("phone", "TEXT"),
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
        query.bind(&self.name).bind(&self.email).bind(&self.phone)
    }

    fn validate(&self) -> Result<(), AppError> {
        non_blank("name", &self.name)?;
        max_length("name", &self.name, 255)?;
        optional_email("email", self.email.as_deref())?;
        if let Some(phone) = &self.phone {
            max_length("phone", phone, 32)?;
        }
        Ok(())
    }
}
