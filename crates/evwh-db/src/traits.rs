//! Warehouse trait definition

use crate::error::DbResult;
use evwh_core::Table;

/// A relational sink accepting named tables with full-replace semantics.
pub trait Warehouse {
    /// Replace `table.name` with exactly the rows of `table`, returning the
    /// number of rows written.
    fn replace_table(&self, table: &Table) -> DbResult<usize>;

    /// Check if a table exists
    fn table_exists(&self, name: &str) -> DbResult<bool>;

    /// Number of rows currently stored in `name`
    fn row_count(&self, name: &str) -> DbResult<usize>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Replace every table in order, stopping at the first failure.
    ///
    /// Tables written before a failure are left in place; callers must rerun
    /// the whole load to get a consistent warehouse.
    fn replace_all(&self, tables: &[&Table]) -> DbResult<Vec<(String, usize)>> {
        let mut written = Vec::with_capacity(tables.len());
        for table in tables {
            let rows = self.replace_table(table).map_err(|e| {
                log::error!("{}: failed to load {}: {}", self.db_type(), table.name, e);
                e
            })?;
            log::info!("{}: loaded {} ({} rows)", self.db_type(), table.name, rows);
            written.push((table.name.to_string(), rows));
        }
        Ok(written)
    }
}
