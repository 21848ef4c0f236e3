//! evwh-extract - Extraction for the EV registration warehouse
//!
//! Fetches the raw CSV payload (over HTTP or from a local file), parses it
//! into a [`RawTable`](evwh_core::RawTable), and types it through
//! [`evwh_core::ingest`]. The transform stages never see how the data was
//! obtained.

pub mod csv_reader;
pub mod error;
pub mod source;

pub use csv_reader::{parse_csv, read_csv_file};
pub use error::{ExtractError, ExtractResult};
pub use source::{extract, FileSource, HttpSource, Source};
