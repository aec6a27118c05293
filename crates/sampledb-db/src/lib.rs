//! Sampledb-DB: Schema, seed batch, queries, and reports.
//!
//! This crate provides the database side of sampledb using SQLite with
//! rusqlite and r2d2 connection pooling.
//!
//! # Modules
//!
//! - `pool` - Connection pool management
//! - `executor` - Generic statement execution with commit/rollback
//! - `schema` - Idempotent table creation per variant
//! - `tables` - Fixed set of known table identifiers
//! - `models` - Rust models matching the database schema
//! - `queries` - Row-level CRUD operations
//! - `seed` - The literal sample batch
//! - `reports` - Canned read-only reports
//!
//! # Example
//!
//! ```no_run
//! use sampledb_common::Variant;
//! use sampledb_db::pool::{get_conn, init_pool, PoolOptions};
//! use sampledb_db::reports::{self, ReportKind, ReportParams};
//! use sampledb_db::{schema, seed};
//!
//! let pool = init_pool("/var/lib/sampledb/shop.sqlite", PoolOptions::default()).unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! schema::create_tables(&conn, Variant::Commerce).unwrap();
//! seed::load(&conn, Variant::Commerce).unwrap();
//!
//! let tables = reports::run(&conn, ReportKind::CashSales, &ReportParams::default()).unwrap();
//! println!("{} rows", tables[0].rows.len());
//! ```

mod error;

pub mod executor;
pub mod models;
pub mod pool;
pub mod queries;
pub mod reports;
pub mod schema;
pub mod seed;
pub mod tables;

pub(crate) use error::{column_parse, sql_error};
