//! In-memory warehouse backend

use crate::error::{DbError, DbResult};
use crate::traits::Warehouse;
use evwh_core::Table;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Keeps replaced tables in memory and records the order they were written.
///
/// `fail_on` makes writes to one table name fail, to exercise abort behavior.
#[derive(Debug, Default)]
pub struct MemoryWarehouse {
    tables: RefCell<BTreeMap<String, Table>>,
    write_log: RefCell<Vec<String>>,
    fail_on: Option<String>,
}

impl MemoryWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// A warehouse whose writes to `table` always fail.
    pub fn failing_on(table: impl Into<String>) -> Self {
        Self {
            fail_on: Some(table.into()),
            ..Self::default()
        }
    }

    /// Snapshot of a stored table.
    pub fn table(&self, name: &str) -> Option<Table> {
        self.tables.borrow().get(name).cloned()
    }

    /// Table names in the order they were successfully written.
    pub fn write_log(&self) -> Vec<String> {
        self.write_log.borrow().clone()
    }
}

impl Warehouse for MemoryWarehouse {
    fn replace_table(&self, table: &Table) -> DbResult<usize> {
        if self.fail_on.as_deref() == Some(table.name.as_str()) {
            return Err(DbError::ExecutionError(format!(
                "simulated write failure for {}",
                table.name
            )));
        }
        self.tables
            .borrow_mut()
            .insert(table.name.to_string(), table.clone());
        self.write_log.borrow_mut().push(table.name.to_string());
        Ok(table.len())
    }

    fn table_exists(&self, name: &str) -> DbResult<bool> {
        Ok(self.tables.borrow().contains_key(name))
    }

    fn row_count(&self, name: &str) -> DbResult<usize> {
        self.tables
            .borrow()
            .get(name)
            .map(Table::len)
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))
    }

    fn db_type(&self) -> &'static str {
        "memory"
    }
}
