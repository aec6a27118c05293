//! Known table identifiers.
//!
//! Any statement that needs a table name in identifier position takes it from
//! [`Table`], never from caller-supplied text.

use rusqlite::Connection;
use sampledb_common::{Error, Result, Variant};
use serde::Serialize;
use std::fmt;

use crate::sql_error;

/// A base table of one of the two variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Clients,
    Products,
    Sales,
    Cinemas,
    Movies,
    Screenings,
}

const COMMERCE: [Table; 3] = [Table::Clients, Table::Products, Table::Sales];
const CINEMA: [Table; 3] = [Table::Cinemas, Table::Movies, Table::Screenings];

impl Table {
    /// SQL identifier of the table.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Products => "products",
            Self::Sales => "sales",
            Self::Cinemas => "cinemas",
            Self::Movies => "movies",
            Self::Screenings => "screenings",
        }
    }

    /// Tables of a variant, parents before the children that reference them.
    pub fn for_variant(variant: Variant) -> &'static [Table] {
        match variant {
            Variant::Commerce => &COMMERCE,
            Variant::Cinema => &CINEMA,
        }
    }

    pub fn variant(self) -> Variant {
        match self {
            Self::Clients | Self::Products | Self::Sales => Variant::Commerce,
            Self::Cinemas | Self::Movies | Self::Screenings => Variant::Cinema,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Table {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        COMMERCE
            .iter()
            .chain(CINEMA.iter())
            .copied()
            .find(|table| table.as_str() == s)
            .ok_or_else(|| Error::invalid_input(format!("Unknown table: {}", s)))
    }
}

/// Count the rows currently stored in `table`.
pub fn count_rows(conn: &Connection, table: Table) -> Result<i64> {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", table.as_str()),
        [],
        |row| row.get(0),
    )
    .map_err(sql_error)
}
