//! Ingestion boundary: raw string table to typed `Dataset`
//!
//! Headers are canonicalized once here and resolved against the declared field
//! table. Cells are parsed according to each field's kind. Nothing past this
//! point looks at raw header strings.

use crate::dataset::{Dataset, Record};
use crate::field::Field;
use crate::value::Value;
use std::collections::BTreeMap;

/// A parsed-but-untyped table as handed over by an extractor.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// What happened while typing a raw table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// Rows seen
    pub rows: usize,
    /// Headers with no counterpart in the field table
    pub ignored_headers: Vec<String>,
    /// Headers that resolved to a field already claimed by an earlier header
    pub duplicate_headers: Vec<String>,
    /// Per-field count of non-empty cells that failed to parse (stored as null)
    pub invalid_cells: BTreeMap<Field, usize>,
}

/// Type a raw table against the declared schema.
pub fn ingest(raw: &RawTable) -> (Dataset, IngestReport) {
    let mut report = IngestReport {
        rows: raw.rows.len(),
        ..Default::default()
    };

    // (column index, field) for every header we keep
    let mut mapping: Vec<(usize, Field)> = Vec::new();
    for (idx, header) in raw.headers.iter().enumerate() {
        match Field::resolve_header(header) {
            Some(field) if mapping.iter().any(|(_, f)| *f == field) => {
                log::warn!(
                    "Header '{}' resolves to '{}' which is already mapped; ignoring it",
                    header,
                    field
                );
                report.duplicate_headers.push(header.clone());
            }
            Some(field) => mapping.push((idx, field)),
            None => {
                log::debug!("Ignoring unrecognized header '{}'", header);
                report.ignored_headers.push(header.clone());
            }
        }
    }

    let mut records = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        let mut record = Record::new();
        for (idx, field) in &mapping {
            let cell = row.get(*idx).map(String::as_str).unwrap_or("");
            let value = match Value::parse(cell, field.kind()) {
                Some(v) => v,
                None => {
                    *report.invalid_cells.entry(*field).or_insert(0) += 1;
                    Value::Null
                }
            };
            record.set(*field, value);
        }
        records.push(record);
    }

    for (field, count) in &report.invalid_cells {
        log::warn!(
            "{} value(s) in '{}' could not be parsed as {} and were treated as missing",
            count,
            field,
            field.kind()
        );
    }

    let columns = mapping.into_iter().map(|(_, f)| f).collect();
    (Dataset::new(columns, records), report)
}
