//! DuckDB warehouse backend

use crate::error::{DbError, DbResult};
use crate::sql_utils::quote_ident;
use crate::traits::Warehouse;
use ::duckdb::types::{ToSql, ToSqlOutput, Value as DuckValue};
use ::duckdb::{params_from_iter, Connection};
use evwh_core::{Table, Value};
use std::path::Path;

/// DuckDB warehouse backend
///
/// Single-threaded; the connection is released when the backend is dropped.
pub struct DuckDbBackend {
    conn: Connection,
}

/// Binds a core [`Value`] as a DuckDB parameter.
struct SqlValue<'a>(&'a Value);

impl ToSql for SqlValue<'_> {
    fn to_sql(&self) -> ::duckdb::Result<ToSqlOutput<'_>> {
        let value = match self.0 {
            Value::Null => DuckValue::Null,
            Value::Text(s) => DuckValue::Text(s.clone()),
            Value::Integer(n) => DuckValue::BigInt(*n),
            Value::Float(x) => DuckValue::Double(*x),
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", e, path.display())))?;
        Ok(Self { conn })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
    /// error.
    fn transaction<F, T>(&self, body: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(DbError::TransactionError(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(_) => {
                let _ = self.conn.execute_batch("ROLLBACK");
            }
        }
        result
    }
}

/// `CREATE OR REPLACE TABLE` statement for `table`'s columns.
fn create_table_sql(table: &Table) -> String {
    let columns = table
        .columns
        .iter()
        .map(|c| format!("{} {}", quote_ident(&c.name), c.kind.sql_type()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "CREATE OR REPLACE TABLE {} ({})",
        quote_ident(table.name.as_str()),
        columns
    )
}

fn insert_sql(table: &Table) -> String {
    let placeholders = vec!["?"; table.columns.len()].join(", ");
    format!(
        "INSERT INTO {} VALUES ({})",
        quote_ident(table.name.as_str()),
        placeholders
    )
}

impl Warehouse for DuckDbBackend {
    fn replace_table(&self, table: &Table) -> DbResult<usize> {
        if table.name.is_empty() {
            return Err(DbError::InvalidTable {
                table: String::new(),
                reason: "empty table name".to_string(),
            });
        }
        if table.columns.is_empty() {
            return Err(DbError::InvalidTable {
                table: table.name.to_string(),
                reason: "no columns".to_string(),
            });
        }

        self.transaction(|conn| {
            conn.execute_batch(&create_table_sql(table))
                .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, table.name)))?;

            if !table.rows.is_empty() {
                let mut stmt = conn.prepare(&insert_sql(table))?;
                for row in &table.rows {
                    stmt.execute(params_from_iter(row.iter().map(SqlValue)))?;
                }
            }
            Ok(table.len())
        })
    }

    fn table_exists(&self, name: &str) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = 'main' AND table_name = ?",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn row_count(&self, name: &str) -> DbResult<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_ident(name)),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
