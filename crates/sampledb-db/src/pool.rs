//! Database connection pool management.
//!
//! This module provides connection pooling for SQLite using r2d2. A pooled
//! connection is returned to the pool when it is dropped, so every exit path
//! of the caller releases it.

use std::path::Path;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use sampledb_common::{Error, Result};

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Pool sizing and connect behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    /// Maximum number of open connections.
    pub max_size: u32,
    /// How long to wait for a connection before giving up.
    pub connection_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 1,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

/// Initialize a new database pool with the given file path.
///
/// This function will:
/// - Create the SQLite database file if it doesn't exist
/// - Set up connection pooling with r2d2
/// - Enable foreign key constraints on all connections
///
/// Tables are not created here; see [`crate::schema::create_tables`].
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite database file
/// * `options` - Pool size and connection timeout
///
/// # Returns
///
/// * `Ok(DbPool)` - Initialized connection pool
/// * `Err(Error::Connection)` - If the database cannot be opened
///
/// # Example
///
/// ```no_run
/// use sampledb_db::pool::{init_pool, PoolOptions};
///
/// let pool = init_pool("/var/lib/sampledb/shop.sqlite", PoolOptions::default()).unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_pool(db_path: &str, options: PoolOptions) -> Result<DbPool> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(Error::connection(format!(
                "Database directory does not exist: {}",
                parent.display()
            )));
        }
    }

    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        // Cascades and FK checks are off by default in SQLite
        conn.execute_batch("PRAGMA foreign_keys = ON;")
    });

    let pool = Pool::builder()
        .max_size(options.max_size)
        .connection_timeout(options.connection_timeout)
        .build(manager)
        .map_err(|e| Error::connection(format!("Failed to open database {}: {}", db_path, e)))?;

    tracing::debug!(path = db_path, max_size = options.max_size, "Opened connection pool");

    Ok(pool)
}

/// Initialize an in-memory database pool for testing.
///
/// The pool holds a single connection so every checkout sees the same
/// database. The database is lost when the pool is dropped.
///
/// # Example
///
/// ```
/// use sampledb_db::pool::init_memory_pool;
///
/// let pool = init_memory_pool().unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
    });

    Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| Error::connection(format!("Failed to create in-memory pool: {}", e)))
}

/// Get a connection from the pool.
///
/// This is a convenience wrapper around `pool.get()` that converts the
/// r2d2 error into our common Error type.
///
/// # Example
///
/// ```
/// use sampledb_db::pool::{init_memory_pool, get_conn};
///
/// let pool = init_memory_pool().unwrap();
/// let conn = get_conn(&pool).unwrap();
/// ```
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::connection(format!("Failed to get connection from pool: {}", e)))
}
