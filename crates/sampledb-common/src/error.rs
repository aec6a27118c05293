//! Common error types used throughout sampledb.
//!
//! Connection failures, statement failures and constraint violations are
//! separate variants so callers can branch on what went wrong instead of
//! reading console text.

/// Common error type for sampledb.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A database session could not be established.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A statement failed while executing.
    #[error("Query error: {0}")]
    Query(String),

    /// The store rejected a row (CHECK, FOREIGN KEY, NOT NULL, UNIQUE).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// The requested row was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new Connection error.
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a new Query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        Self::Query(msg.into())
    }

    /// Create a new Constraint error.
    pub fn constraint<S: Into<String>>(msg: S) -> Self {
        Self::Constraint(msg.into())
    }

    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error happened before any statement could run.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
