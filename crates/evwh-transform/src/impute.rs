//! Missing-value imputation from a fixed per-field policy

use evwh_core::{Dataset, Field, ImputationConfig, Value};
use std::collections::{BTreeMap, HashMap};

/// How a field's missing values are filled.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    /// A literal default
    Constant(Value),
    /// The most frequent present value in this run, or `fallback` when the
    /// field has no present values at all
    Mode { fallback: Value },
}

/// Ordered field → fill rule table.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputationPolicy {
    rules: Vec<(Field, Fill)>,
}

impl ImputationPolicy {
    pub fn new(rules: Vec<(Field, Fill)>) -> Self {
        Self { rules }
    }

    /// Policy for the registration dataset.
    ///
    /// Numeric fields get sentinel defaults (`-1` marks an unknown district or
    /// tract); model year takes the run's mode. Categorical fields get
    /// placeholder strings.
    pub fn standard(fallback_model_year: i64) -> Self {
        Self::new(vec![
            (Field::ElectricRange, Fill::Constant(Value::Integer(0))),
            (Field::BaseMsrp, Fill::Constant(Value::Float(0.0))),
            (Field::LegislativeDistrict, Fill::Constant(Value::Integer(-1))),
            (Field::CensusTract2020, Fill::Constant(Value::Integer(-1))),
            (
                Field::ModelYear,
                Fill::Mode {
                    fallback: Value::Integer(fallback_model_year),
                },
            ),
            (Field::County, Fill::Constant(Value::from("Unknown"))),
            (Field::City, Fill::Constant(Value::from("Unknown"))),
            (Field::State, Fill::Constant(Value::from("WA"))),
            (Field::PostalCode, Fill::Constant(Value::from("00000"))),
            (Field::CafvEligibility, Fill::Constant(Value::from("Unknown"))),
        ])
    }

    pub fn from_config(config: &ImputationConfig) -> Self {
        Self::standard(config.fallback_model_year)
    }

    /// Fields this policy covers (the "recognized" fields of a clean record).
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.rules.iter().map(|(f, _)| *f)
    }

    pub fn rules(&self) -> &[(Field, Fill)] {
        &self.rules
    }
}

impl Default for ImputationPolicy {
    fn default() -> Self {
        Self::from_config(&ImputationConfig::default())
    }
}

/// Result of [`impute`].
#[derive(Debug, Clone)]
pub struct ImputeOutcome {
    pub dataset: Dataset,
    /// Number of values filled per field (only fields with at least one fill)
    pub filled: BTreeMap<Field, usize>,
    /// Default actually used per field present in the dataset
    pub defaults: BTreeMap<Field, Value>,
}

/// Most frequent present value; ties go to the smallest value.
pub fn mode<'a>(values: impl IntoIterator<Item = &'a Value>) -> Option<Value> {
    let mut counts: HashMap<String, (usize, &Value)> = HashMap::new();
    for value in values {
        if let Some(key) = value.key_repr() {
            counts.entry(key).or_insert((0, value)).0 += 1;
        }
    }
    counts
        .into_values()
        .max_by(|(ca, a), (cb, b)| ca.cmp(cb).then_with(|| b.natural_cmp(a)))
        .map(|(_, v)| v.clone())
}

/// Fill missing values according to `policy`.
///
/// Data-dependent defaults are resolved against the incoming dataset before
/// any value is filled. Policy fields missing from the input schema are
/// skipped.
pub fn impute(dataset: Dataset, policy: &ImputationPolicy) -> ImputeOutcome {
    let mut defaults = BTreeMap::new();
    for (field, fill) in policy.rules() {
        if !dataset.has_column(*field) {
            log::debug!("Skipping imputation for '{}': not in input", field);
            continue;
        }
        let default = match fill {
            Fill::Constant(v) => v.clone(),
            Fill::Mode { fallback } => {
                mode(dataset.column_values(*field)).unwrap_or_else(|| fallback.clone())
            }
        };
        defaults.insert(*field, default);
    }

    let (columns, mut records) = dataset.into_parts();
    let mut filled: BTreeMap<Field, usize> = BTreeMap::new();
    for record in &mut records {
        for (field, default) in &defaults {
            if record.is_absent(*field) {
                record.set(*field, default.clone());
                *filled.entry(*field).or_insert(0) += 1;
            }
        }
    }

    for (field, count) in &filled {
        log::info!(
            "{}: filled {} missing values with '{}'",
            field,
            count,
            defaults[field]
        );
    }

    ImputeOutcome {
        dataset: Dataset::new(columns, records),
        filled,
        defaults,
    }
}

#[cfg(test)]
#[path = "impute_test.rs"]
mod tests;
