//! Generic statement execution.
//!
//! [`execute`] runs one statement with positional parameters. When the
//! connection is in autocommit mode the statement gets its own transaction,
//! committed on success and rolled back on failure. Inside a caller's
//! transaction it simply participates and leaves commit/rollback to the caller.
//!
//! Failures are always returned, so an empty result set and a failed query
//! are different outcomes.
//!
//! This is the path for untyped result sets, where the columns are not known
//! until the statement runs (the `all-tables` dump). Typed reports and the
//! CRUD queries map rows into structs directly.

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use sampledb_common::Result;

use crate::sql_error;

/// One result row: column values in select-list order.
pub type Row = Vec<Value>;

/// Whether the caller expects a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    /// Run for side effects and report the affected row count.
    Nothing,
    /// Materialize every row of the result set.
    Rows,
}

/// A fully materialized result set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// What a statement produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Affected(usize),
    Rows(ResultSet),
}

impl Outcome {
    /// Result set of a fetching statement; empty for `Affected`.
    pub fn into_result_set(self) -> ResultSet {
        match self {
            Self::Rows(set) => set,
            Self::Affected(_) => ResultSet::default(),
        }
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.into_result_set().rows
    }

    pub fn affected(&self) -> usize {
        match self {
            Self::Affected(n) => *n,
            Self::Rows(_) => 0,
        }
    }
}

/// Execute `sql` with `params` bound in order.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `sql` - Statement text with `?` placeholders
/// * `params` - Values bound to the placeholders in order
/// * `fetch` - Whether to collect a result set
///
/// # Returns
///
/// * `Ok(Outcome)` - Rows or affected count
/// * `Err(Error::Constraint)` - If the store rejected a row
/// * `Err(Error::Query)` - For any other failure; the transaction was rolled back
pub fn execute(conn: &Connection, sql: &str, params: &[Value], fetch: Fetch) -> Result<Outcome> {
    if !conn.is_autocommit() {
        return run(conn, sql, params, fetch);
    }

    let tx = conn.unchecked_transaction().map_err(sql_error)?;
    match run(&tx, sql, params, fetch) {
        Ok(outcome) => {
            tx.commit().map_err(sql_error)?;
            Ok(outcome)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Statement failed, rolling back");
            // Dropping the transaction rolls back; do it explicitly to surface errors
            if let Err(rollback) = tx.rollback() {
                tracing::error!(error = %rollback, "Rollback failed");
            }
            Err(e)
        }
    }
}

fn run(conn: &Connection, sql: &str, params: &[Value], fetch: Fetch) -> Result<Outcome> {
    let mut stmt = conn.prepare(sql).map_err(sql_error)?;

    match fetch {
        Fetch::Nothing => {
            let affected = stmt.execute(params_from_iter(params)).map_err(sql_error)?;
            Ok(Outcome::Affected(affected))
        }
        Fetch::Rows => {
            let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
            let width = columns.len();
            let mut rows = stmt.query(params_from_iter(params)).map_err(sql_error)?;

            let mut collected = Vec::new();
            while let Some(row) = rows.next().map_err(sql_error)? {
                let values = (0..width)
                    .map(|idx| row.get::<_, Value>(idx))
                    .collect::<rusqlite::Result<Row>>()
                    .map_err(sql_error)?;
                collected.push(values);
            }

            Ok(Outcome::Rows(ResultSet {
                columns,
                rows: collected,
            }))
        }
    }
}

/// Render a stored value for console output.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Real(r) => r.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}
