//! Error types for evwh-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table not found: {0}")]
    TableNotFound(String),

    /// Table cannot be written as given (D004)
    #[error("[D004] Invalid table '{table}': {reason}")]
    InvalidTable { table: String, reason: String },

    /// Transaction management error (D005)
    #[error("[D005] Transaction failed: {0}")]
    TransactionError(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<::duckdb::Error> for DbError {
    fn from(err: ::duckdb::Error) -> Self {
        // duckdb::Error has no structured "missing table" variant; match the
        // catalog message narrowly.
        let msg = err.to_string();
        if msg.contains("Catalog Error") && msg.contains("Table with name") {
            DbError::TableNotFound(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
