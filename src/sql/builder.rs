//! Builds parameterized INSERT, SELECT, UPDATE, DELETE and table DDL from an entity's column mapping.

use crate::entity::{Entity, CREATED_AT_COLUMN, ID_COLUMN};

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn qualified_table<E: Entity>(schema: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(E::TABLE))
}

/// Every column the row mapping reads: id, created_at, then `E::COLUMNS`.
fn select_column_list<E: Entity>() -> String {
    [ID_COLUMN, CREATED_AT_COLUMN]
        .into_iter()
        .chain(E::COLUMNS.iter().map(|c| c.name))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// INSERT of all writable columns; id and created_at come from column defaults.
/// Binds `$1..$n` in `E::COLUMNS` order.
pub fn insert<E: Entity>(schema: &str) -> String {
    let cols: Vec<String> = E::COLUMNS.iter().map(|c| quoted(c.name)).collect();
    let placeholders: Vec<String> = (1..=E::COLUMNS.len()).map(|n| format!("${}", n)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        qualified_table::<E>(schema),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list::<E>()
    )
}

/// UPDATE of all writable columns by id. Binds columns as `$1..$n`, then the id as `$n+1`.
/// Returns no row when the id does not exist.
pub fn update_by_id<E: Entity>(schema: &str) -> String {
    let sets: Vec<String> = E::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", quoted(c.name), i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        qualified_table::<E>(schema),
        sets.join(", "),
        quoted(ID_COLUMN),
        E::COLUMNS.len() + 1,
        select_column_list::<E>()
    )
}

/// SELECT by primary key. Caller binds id as sole param.
pub fn select_by_id<E: Entity>(schema: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list::<E>(),
        qualified_table::<E>(schema),
        quoted(ID_COLUMN)
    )
}

/// SELECT every row, ORDER BY id.
pub fn select_all<E: Entity>(schema: &str) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list::<E>(),
        qualified_table::<E>(schema),
        quoted(ID_COLUMN)
    )
}

/// DELETE by id.
pub fn delete_by_id<E: Entity>(schema: &str) -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1",
        qualified_table::<E>(schema),
        quoted(ID_COLUMN)
    )
}

pub fn create_schema(schema: &str) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema))
}

/// CREATE TABLE IF NOT EXISTS with an identity primary key and an insert timestamp.
pub fn create_table<E: Entity>(schema: &str) -> String {
    let mut defs = vec![
        format!("{} BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY", quoted(ID_COLUMN)),
        format!("{} TIMESTAMPTZ NOT NULL DEFAULT NOW()", quoted(CREATED_AT_COLUMN)),
    ];
    for c in E::COLUMNS {
        let null = if c.nullable { "" } else { " NOT NULL" };
        defs.push(format!("{} {}{}", quoted(c.name), c.pg_type, null));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        qualified_table::<E>(schema),
        defs.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Customer, Product};

    #[test]
    fn insert_binds_columns_in_order_and_returns_full_row() {
        assert_eq!(
            insert::<Customer>("public"),
            r#"INSERT INTO "public"."customers" ("name", "email", "phone") VALUES ($1, $2, $3) RETURNING "id", "created_at", "name", "email", "phone""#
        );
    }

    #[test]
    fn update_places_id_after_columns() {
        assert_eq!(
            update_by_id::<Product>("shop"),
            r#"UPDATE "shop"."products" SET "name" = $1, "price" = $2 WHERE "id" = $3 RETURNING "id", "created_at", "name", "price""#
        );
    }

    #[test]
    fn selects_and_delete() {
        assert_eq!(
            select_by_id::<Product>("public"),
            r#"SELECT "id", "created_at", "name", "price" FROM "public"."products" WHERE "id" = $1"#
        );
        assert_eq!(
            select_all::<Customer>("public"),
            r#"SELECT "id", "created_at", "name", "email", "phone" FROM "public"."customers" ORDER BY "id""#
        );
        assert_eq!(
            delete_by_id::<Customer>("public"),
            r#"DELETE FROM "public"."customers" WHERE "id" = $1"#
        );
    }

    #[test]
    fn ddl_marks_required_columns_not_null() {
        assert_eq!(
            create_table::<Product>("public"),
            r#"CREATE TABLE IF NOT EXISTS "public"."products" ("id" BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY, "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(), "name" TEXT NOT NULL, "price" DOUBLE PRECISION NOT NULL)"#
        );
        let customers = create_table::<Customer>("public");
        assert!(customers.contains(r#""email" TEXT,"#));
        assert!(customers.ends_with(r#""phone" TEXT)"#));
    }

    #[test]
    fn identifiers_are_escaped() {
        assert_eq!(quoted(r#"we"ird"#), r#""we""ird""#);
        assert_eq!(create_schema("app"), r#"CREATE SCHEMA IF NOT EXISTS "app""#);
    }
}
