//! Printable report output.

use serde::Serialize;

use crate::executor::{display_value, ResultSet};

/// A typed report row that can be laid out as table cells.
pub trait ReportRow {
    /// Column headers, in cell order.
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// One titled result set, ready for the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn from_rows<R: ReportRow>(title: impl Into<String>, rows: &[R]) -> Self {
        Self {
            title: title.into(),
            columns: R::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: rows.iter().map(ReportRow::cells).collect(),
        }
    }

    pub fn from_result_set(title: impl Into<String>, set: &ResultSet) -> Self {
        Self {
            title: title.into(),
            columns: set.columns.clone(),
            rows: set
                .rows
                .iter()
                .map(|row| row.iter().map(display_value).collect())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, by header.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }
}

/// Two decimal places, the precision of percentage columns.
pub(crate) fn percent(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::types::Value;

    struct Pair(&'static str, i64);

    impl ReportRow for Pair {
        const COLUMNS: &'static [&'static str] = &["name", "n"];

        fn cells(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn test_from_rows() {
        let table = ReportTable::from_rows("Pairs", &[Pair("a", 1), Pair("b", 2)]);

        assert_eq!(table.columns, vec!["name", "n"]);
        assert_eq!(table.column("n").unwrap(), vec!["1", "2"]);
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn test_from_result_set() {
        let set = ResultSet {
            columns: vec!["id".into(), "rating".into()],
            rows: vec![vec![Value::Integer(1), Value::Null]],
        };

        let table = ReportTable::from_result_set("Table: movies", &set);
        assert_eq!(table.rows, vec![vec!["1".to_string(), "NULL".to_string()]]);
    }

    #[test]
    fn test_empty_table() {
        let table = ReportTable::from_rows::<Pair>("Nothing", &[]);
        assert!(table.is_empty());
        assert_eq!(table.columns.len(), 2);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(5.0), "5.00");
        assert_eq!(percent(12.5), "12.50");
    }
}
