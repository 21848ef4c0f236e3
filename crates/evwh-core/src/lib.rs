//! evwh-core - Core library for the EV registration warehouse
//!
//! This crate provides the typed field schema declared once for the whole
//! pipeline, the dynamically typed cell values, the owned `Dataset` threaded
//! through each transform stage, output table shapes, and configuration
//! parsing for `evwh.yml`.

pub mod config;
pub mod dataset;
pub mod error;
pub mod field;
pub mod ingest;
pub mod table;
pub mod value;

pub use config::{Config, DatabaseConfig, ImputationConfig, SourceConfig};
pub use dataset::{Dataset, Record};
pub use error::{CoreError, CoreResult};
pub use field::{canonicalize, Field, FieldKind};
pub use ingest::{ingest, IngestReport, RawTable};
pub use table::{Column, Table, TableName};
pub use value::Value;
