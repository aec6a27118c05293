//! Schema initialization.
//!
//! Each variant has one embedded DDL batch made of `CREATE TABLE IF NOT EXISTS`
//! statements, so running it against a database that already has the tables
//! is a no-op. There is no schema versioning.

use rusqlite::Connection;
use sampledb_common::{Result, Variant};

use crate::sql_error;
use crate::tables::Table;

const COMMERCE_SQL: &str = include_str!("commerce.sql");
const CINEMA_SQL: &str = include_str!("cinema.sql");

fn batch_for(variant: Variant) -> &'static str {
    match variant {
        Variant::Commerce => COMMERCE_SQL,
        Variant::Cinema => CINEMA_SQL,
    }
}

/// Create every table of `variant` that does not exist yet.
///
/// The batch runs in a single transaction; if any statement fails nothing is
/// created.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `variant` - Which schema to create
///
/// # Returns
///
/// * `Ok(())` - If the tables exist afterwards
/// * `Err(Error)` - If the batch failed
pub fn create_tables(conn: &Connection, variant: Variant) -> Result<()> {
    let tx = conn.unchecked_transaction().map_err(sql_error)?;
    tx.execute_batch(batch_for(variant)).map_err(sql_error)?;
    tx.commit().map_err(sql_error)?;

    tracing::info!(%variant, "Tables ensured");
    Ok(())
}

/// Names of all user tables in the database, sorted.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )
        .map_err(sql_error)?;

    let names = stmt
        .query_map([], |row| row.get(0))
        .map_err(sql_error)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(sql_error)?;

    Ok(names)
}

/// Whether every table of `variant` exists.
pub fn is_initialized(conn: &Connection, variant: Variant) -> Result<bool> {
    let existing = list_tables(conn)?;
    Ok(Table::for_variant(variant)
        .iter()
        .all(|table| existing.iter().any(|name| name == table.as_str())))
}

/// Delete every row of `variant`'s tables, children first.
///
/// # Returns
///
/// * `Ok(usize)` - Total number of rows removed
/// * `Err(Error)` - If a delete failed (nothing is removed)
pub fn clear_tables(conn: &Connection, variant: Variant) -> Result<usize> {
    let tx = conn.unchecked_transaction().map_err(sql_error)?;

    let mut removed = 0;
    for table in Table::for_variant(variant).iter().rev() {
        removed += tx
            .execute(&format!("DELETE FROM {}", table.as_str()), [])
            .map_err(sql_error)?;
    }

    tx.commit().map_err(sql_error)?;

    tracing::info!(%variant, removed, "Tables cleared");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_memory_pool;
    use crate::tables::count_rows;

    #[test]
    fn test_create_tables_commerce() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        create_tables(&conn, Variant::Commerce).unwrap();

        assert_eq!(list_tables(&conn).unwrap(), vec!["clients", "products", "sales"]);
        assert!(is_initialized(&conn, Variant::Commerce).unwrap());
        assert!(!is_initialized(&conn, Variant::Cinema).unwrap());
    }

    #[test]
    fn test_create_tables_cinema() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        create_tables(&conn, Variant::Cinema).unwrap();

        assert_eq!(list_tables(&conn).unwrap(), vec!["cinemas", "movies", "screenings"]);
    }

    #[test]
    fn test_create_tables_is_idempotent() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        for variant in Variant::ALL {
            create_tables(&conn, variant).unwrap();
            let first = list_tables(&conn).unwrap();

            create_tables(&conn, variant).unwrap();
            assert_eq!(list_tables(&conn).unwrap(), first);
        }
    }

    #[test]
    fn test_create_tables_keeps_existing_rows() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        create_tables(&conn, Variant::Cinema).unwrap();
        conn.execute(
            "INSERT INTO movies (title, genre, duration_minutes, rating) VALUES ('A', 'drama', 90, 7.0)",
            [],
        )
        .unwrap();

        create_tables(&conn, Variant::Cinema).unwrap();

        assert_eq!(count_rows(&conn, Table::Movies).unwrap(), 1);
    }

    #[test]
    fn test_clear_tables() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        create_tables(&conn, Variant::Commerce).unwrap();
        crate::seed::load(&conn, Variant::Commerce).unwrap();

        let removed = clear_tables(&conn, Variant::Commerce).unwrap();

        assert_eq!(removed, 8);
        for table in Table::for_variant(Variant::Commerce) {
            assert_eq!(count_rows(&conn, *table).unwrap(), 0);
        }
    }
}
