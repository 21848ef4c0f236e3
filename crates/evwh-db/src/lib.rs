//! evwh-db - Warehouse sink for the EV registration warehouse
//!
//! This crate provides the `Warehouse` trait (named-table, full-replace
//! writes), a DuckDB implementation, and an in-memory implementation used to
//! exercise load ordering and failure handling.

pub mod duckdb;
pub mod error;
pub mod memory;
pub mod sql_utils;
pub mod traits;

pub use self::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use memory::MemoryWarehouse;
pub use traits::Warehouse;
