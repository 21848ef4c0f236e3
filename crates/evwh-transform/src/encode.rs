//! Categorical encoding
//!
//! Codes are informational: they are stored next to the original field and
//! never used for key resolution.

use evwh_core::{Dataset, Field, Value};
use std::collections::{BTreeMap, HashMap};

/// Code assigned to an absent value.
pub const MISSING_CODE: i64 = -1;

/// Which field to encode and where to store its codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingSpec {
    pub source: Field,
    pub code: Field,
}

impl EncodingSpec {
    pub const fn new(source: Field, code: Field) -> Self {
        Self { source, code }
    }

    /// The categorical encodings applied to the registration dataset.
    pub fn standard() -> Vec<EncodingSpec> {
        vec![
            EncodingSpec::new(Field::ElectricVehicleType, Field::EvTypeCode),
            EncodingSpec::new(Field::Make, Field::MakeCode),
            EncodingSpec::new(Field::CafvEligibility, Field::CafvCode),
        ]
    }
}

/// A fitted encoding: distinct values in natural sort order, indexed by code.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    pub spec: EncodingSpec,
    categories: Vec<Value>,
    index: HashMap<String, i64>,
}

impl Encoding {
    /// Fit an encoding over the present values of a column.
    pub fn fit<'a>(spec: EncodingSpec, values: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut distinct: BTreeMap<String, &Value> = BTreeMap::new();
        for value in values {
            if let Some(key) = value.key_repr() {
                distinct.entry(key).or_insert(value);
            }
        }
        let mut categories: Vec<Value> = distinct.into_values().cloned().collect();
        categories.sort_by(|a, b| a.natural_cmp(b));

        let index = categories
            .iter()
            .enumerate()
            .filter_map(|(code, v)| v.key_repr().map(|k| (k, code as i64)))
            .collect();

        Self {
            spec,
            categories,
            index,
        }
    }

    /// Code of `value`, [`MISSING_CODE`] for absent or unseen values.
    pub fn code_of(&self, value: &Value) -> i64 {
        value
            .key_repr()
            .and_then(|k| self.index.get(&k).copied())
            .unwrap_or(MISSING_CODE)
    }

    /// Original value for `code`.
    pub fn value_of(&self, code: i64) -> Option<&Value> {
        usize::try_from(code).ok().and_then(|i| self.categories.get(i))
    }

    /// code → original value mapping.
    pub fn mapping(&self) -> BTreeMap<i64, Value> {
        self.categories
            .iter()
            .enumerate()
            .map(|(code, v)| (code as i64, v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Result of [`encode`].
#[derive(Debug, Clone)]
pub struct EncodeOutcome {
    pub dataset: Dataset,
    pub encodings: Vec<Encoding>,
}

/// Add a code column for every spec whose source field is in the dataset.
pub fn encode(dataset: Dataset, specs: &[EncodingSpec]) -> EncodeOutcome {
    let encodings: Vec<Encoding> = specs
        .iter()
        .filter(|spec| {
            let present = dataset.has_column(spec.source);
            if !present {
                log::debug!("Skipping encoding of '{}': not in input", spec.source);
            }
            present
        })
        .map(|spec| Encoding::fit(*spec, dataset.column_values(spec.source)))
        .collect();

    let (mut columns, mut records) = dataset.into_parts();
    for encoding in &encodings {
        for record in &mut records {
            let code = encoding.code_of(record.get(encoding.spec.source));
            record.set(encoding.spec.code, code);
        }
        columns.push(encoding.spec.code);
        log::info!(
            "Encoded '{}' as '{}' ({} categories)",
            encoding.spec.source,
            encoding.spec.code,
            encoding.len()
        );
    }

    EncodeOutcome {
        dataset: Dataset::new(columns, records),
        encodings,
    }
}

#[cfg(test)]
#[path = "encode_test.rs"]
mod tests;
