//! Database bootstrap: create the database and entity tables when missing, open the pool.

use crate::config::Settings;
use crate::entity::{Customer, Entity, Product};
use crate::error::{AppError, ConfigError};
use crate::sql;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Ensure the database named in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = admin_options(database_url)?;
    let Some(db_name) = db_name.filter(|n| !n.is_empty() && n != "postgres") else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` maintenance database on the same server, plus the target database name.
fn admin_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|_| ConfigError::InvalidValue {
        key: "DATABASE_URL",
        value: database_url.to_string(),
    })?;
    let db_name = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

pub async fn connect(settings: &Settings) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .acquire_timeout(settings.db_acquire_timeout)
        .connect(&settings.database_url)
        .await?;
    Ok(pool)
}

async fn ensure_table<E: Entity>(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&sql::create_table::<E>(schema)).execute(pool).await?;
    tracing::debug!(schema, table = E::TABLE, "table ready");
    Ok(())
}

/// Create `schema` and one table per entity if they do not exist. Existing tables are left as they are.
pub async fn ensure_tables(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&sql::create_schema(schema)).execute(pool).await?;
    ensure_table::<Customer>(pool, schema).await?;
    ensure_table::<Product>(pool, schema).await?;
    Ok(())
}
