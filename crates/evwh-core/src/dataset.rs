//! Owned in-memory dataset threaded through the transform stages

use crate::field::Field;
use crate::value::Value;
use std::collections::BTreeMap;

static NULL_VALUE: Value = Value::Null;

/// One registration row.
///
/// A field that was never set reads as `Value::Null`, the same as an explicit
/// null cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: BTreeMap<Field, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for tests and fixtures.
    pub fn with(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<Value>) {
        self.values.insert(field, value.into());
    }

    /// Value of `field`, `Value::Null` when absent.
    pub fn get(&self, field: Field) -> &Value {
        self.values.get(&field).unwrap_or(&NULL_VALUE)
    }

    pub fn is_absent(&self, field: Field) -> bool {
        self.get(field).is_null()
    }

    /// Project the record onto `fields`, preserving their order.
    pub fn project(&self, fields: &[Field]) -> Vec<Value> {
        fields.iter().map(|f| self.get(*f).clone()).collect()
    }
}

/// A tabular dataset: a fixed column list plus owned records.
///
/// Columns record which fields the source actually carried; a field missing
/// from `columns` is missing from the input schema, as opposed to a null cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Field>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<Field>, records: Vec<Record>) -> Self {
        let mut seen = Vec::with_capacity(columns.len());
        for column in columns {
            if !seen.contains(&column) {
                seen.push(column);
            }
        }
        Self {
            columns: seen,
            records,
        }
    }

    pub fn columns(&self) -> &[Field] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_parts(self) -> (Vec<Field>, Vec<Record>) {
        (self.columns, self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, field: Field) -> bool {
        self.columns.contains(&field)
    }

    /// Keep only the fields of `fields` that exist in this dataset's schema.
    pub fn available(&self, fields: &[Field]) -> Vec<Field> {
        fields
            .iter()
            .copied()
            .filter(|f| self.has_column(*f))
            .collect()
    }

    /// Iterate over the values of one column.
    pub fn column_values(&self, field: Field) -> impl Iterator<Item = &Value> {
        self.records.iter().map(move |r| r.get(field))
    }

    /// Number of absent values in `field`.
    pub fn null_count(&self, field: Field) -> usize {
        self.column_values(field).filter(|v| v.is_null()).count()
    }
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
