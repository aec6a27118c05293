//! Canned read-only reports.
//!
//! Every report has a stable kebab-case name and belongs to one variant.
//! [`ReportKind::for_variant`] gives the fixed order a full run prints them in.
//! Each report materializes its whole result set; none depends on another.

pub mod cinema;
pub mod commerce;
mod table;

pub use table::{ReportRow, ReportTable};

use rusqlite::{Connection, Row};
use sampledb_common::{Error, Result, Variant};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sql_error;
use crate::tables::Table;

/// A named report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    CashSales,
    Deliveries,
    ClientTotals,
    ClientPurchases,
    PurchaseCounts,
    PaymentsByMethod,
    AllTables,
    Dramas,
    TopRated,
    Schedule,
    CinemaScreenings,
    GenreSummary,
}

const COMMERCE_REPORTS: [ReportKind; 6] = [
    ReportKind::CashSales,
    ReportKind::Deliveries,
    ReportKind::ClientTotals,
    ReportKind::ClientPurchases,
    ReportKind::PurchaseCounts,
    ReportKind::PaymentsByMethod,
];

const CINEMA_REPORTS: [ReportKind; 6] = [
    ReportKind::AllTables,
    ReportKind::Dramas,
    ReportKind::TopRated,
    ReportKind::Schedule,
    ReportKind::CinemaScreenings,
    ReportKind::GenreSummary,
];

impl ReportKind {
    /// Reports of a variant in run order.
    pub fn for_variant(variant: Variant) -> &'static [ReportKind] {
        match variant {
            Variant::Commerce => &COMMERCE_REPORTS,
            Variant::Cinema => &CINEMA_REPORTS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CashSales => "cash-sales",
            Self::Deliveries => "deliveries",
            Self::ClientTotals => "client-totals",
            Self::ClientPurchases => "client-purchases",
            Self::PurchaseCounts => "purchase-counts",
            Self::PaymentsByMethod => "payments-by-method",
            Self::AllTables => "all-tables",
            Self::Dramas => "dramas",
            Self::TopRated => "top-rated",
            Self::Schedule => "schedule",
            Self::CinemaScreenings => "cinema-screenings",
            Self::GenreSummary => "genre-summary",
        }
    }

    pub fn variant(self) -> Variant {
        if COMMERCE_REPORTS.contains(&self) {
            Variant::Commerce
        } else {
            Variant::Cinema
        }
    }

    /// One-line description, also used as the printed heading.
    pub fn description(self) -> &'static str {
        match self {
            Self::CashSales => "Sales paid in cash",
            Self::Deliveries => "Sales that need delivery",
            Self::ClientTotals => "Amount due per client, before and after discount",
            Self::ClientPurchases => "Purchases of one client",
            Self::PurchaseCounts => "Number of purchases per client",
            Self::PaymentsByMethod => "Amount paid per client, cash / non-cash",
            Self::AllTables => "Contents of every table",
            Self::Dramas => "Dramas",
            Self::TopRated => "Movies by rating",
            Self::Schedule => "Screening schedule",
            Self::CinemaScreenings => "Screenings of one cinema",
            Self::GenreSummary => "Movies per genre",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        COMMERCE_REPORTS
            .iter()
            .chain(CINEMA_REPORTS.iter())
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::invalid_input(format!("Unknown report: {}", s)))
    }
}

/// Parameters of the parameterized reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportParams {
    /// Firm name for `client-purchases`.
    pub client_name: String,
    /// Cinema name for `cinema-screenings`.
    pub cinema_name: String,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            client_name: "Client-1 LLC".to_string(),
            cinema_name: "Kyiv".to_string(),
        }
    }
}

/// Run one report and lay its rows out for printing.
///
/// Most reports yield one table; `all-tables` yields one per cinema table.
///
/// # Returns
///
/// * `Ok(Vec<ReportTable>)` - The result sets, possibly with no rows
/// * `Err(Error)` - If a query failed
pub fn run(conn: &Connection, kind: ReportKind, params: &ReportParams) -> Result<Vec<ReportTable>> {
    let title = kind.description();
    let table = match kind {
        ReportKind::CashSales => ReportTable::from_rows(title, &commerce::cash_sales(conn)?),
        ReportKind::Deliveries => ReportTable::from_rows(title, &commerce::deliveries(conn)?),
        ReportKind::ClientTotals => ReportTable::from_rows(title, &commerce::client_totals(conn)?),
        ReportKind::ClientPurchases => ReportTable::from_rows(
            format!("{} '{}'", title, params.client_name),
            &commerce::client_purchases(conn, &params.client_name)?,
        ),
        ReportKind::PurchaseCounts => {
            ReportTable::from_rows(title, &commerce::purchase_counts(conn)?)
        }
        ReportKind::PaymentsByMethod => {
            ReportTable::from_rows(title, &commerce::payments_by_method(conn)?)
        }
        ReportKind::AllTables => {
            return cinema::dump_tables(conn, Table::for_variant(Variant::Cinema));
        }
        ReportKind::Dramas => ReportTable::from_rows(title, &cinema::dramas(conn)?),
        ReportKind::TopRated => ReportTable::from_rows(title, &cinema::top_rated(conn)?),
        ReportKind::Schedule => ReportTable::from_rows(title, &cinema::schedule(conn)?),
        ReportKind::CinemaScreenings => ReportTable::from_rows(
            format!("{} '{}'", title, params.cinema_name),
            &cinema::cinema_screenings(conn, &params.cinema_name)?,
        ),
        ReportKind::GenreSummary => ReportTable::from_rows(title, &cinema::genre_summary(conn)?),
    };

    Ok(vec![table])
}

/// Prepare `sql` and collect every mapped row.
pub(crate) fn collect<T>(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
    map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(sql).map_err(sql_error)?;
    let rows = stmt
        .query_map(params, map)
        .map_err(sql_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sql_error)?;
    Ok(rows)
}
