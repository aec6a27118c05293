//! Mapping from rusqlite errors to the common error type.

use rusqlite::types::Type;
use rusqlite::{ErrorCode, Row};
use sampledb_common::Error;
use std::str::FromStr;

/// Convert a rusqlite error, keeping constraint violations distinguishable.
pub(crate) fn sql_error(e: rusqlite::Error) -> Error {
    match &e {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            Error::constraint(e.to_string())
        }
        _ => Error::query(e.to_string()),
    }
}

/// Read a text column and parse it into one of the stored-literal enums.
pub(crate) fn column_parse<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use sampledb_common::PaymentMethod;

    #[test]
    fn test_check_violation_maps_to_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (n INTEGER CHECK (n > 0));")
            .unwrap();

        let err = conn
            .execute("INSERT INTO t (n) VALUES (-1)", [])
            .map_err(sql_error)
            .unwrap_err();
        assert!(matches!(err, Error::Constraint(_)));
    }

    #[test]
    fn test_syntax_error_maps_to_query() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.execute("SELEC 1", []).map_err(sql_error).unwrap_err();
        assert!(matches!(err, Error::Query(_)));
    }

    #[test]
    fn test_column_parse() {
        let conn = Connection::open_in_memory().unwrap();
        let method: PaymentMethod = conn
            .query_row("SELECT 'non_cash'", [], |row| column_parse(row, 0))
            .unwrap();
        assert_eq!(method, PaymentMethod::NonCash);

        let bad = conn.query_row("SELECT 'card'", [], |row| column_parse::<PaymentMethod>(row, 0));
        assert!(matches!(bad, Err(rusqlite::Error::FromSqlConversionFailure(0, _, _))));
    }
}
