//! Descriptive statistics over a dataset

use evwh_core::{Dataset, Field, Value};
use serde::Serialize;
use std::collections::HashMap;

/// Numeric features summarized by [`profile`].
pub const NUMERIC_FEATURES: [Field; 3] = [Field::ElectricRange, Field::ModelYear, Field::BaseMsrp];

/// Categorical features whose value distributions are reported.
pub const CATEGORICAL_FEATURES: [Field; 3] =
    [Field::Make, Field::ElectricVehicleType, Field::County];

/// Summary statistics of a numeric column's present values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation, `None` with fewer than two values
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub p25: f64,
    pub p75: f64,
}

impl NumericSummary {
    /// Summarize `values`, `None` when there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std_dev = (count > 1).then(|| {
            let var = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        });

        Some(Self {
            count,
            mean,
            median: quantile(&sorted, 0.5),
            std_dev,
            min: sorted[0],
            max: sorted[count - 1],
            p25: quantile(&sorted, 0.25),
            p75: quantile(&sorted, 0.75),
        })
    }
}

/// Linear-interpolated quantile of a non-empty sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Missing-value count for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingStat {
    pub field: Field,
    pub count: usize,
    pub percent: f64,
}

/// Dataset profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub rows: usize,
    pub columns: usize,
    /// Only columns with at least one missing value
    pub missing: Vec<MissingStat>,
    pub numeric: Vec<(Field, NumericSummary)>,
    /// Three most common model years
    pub top_model_years: Vec<(Value, usize)>,
    pub distributions: Vec<(Field, Vec<(Value, usize)>)>,
}

/// Present values of a column with their counts, most frequent first.
///
/// Ties are ordered by value.
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a Value>) -> Vec<(Value, usize)> {
    let mut counts: HashMap<String, (&Value, usize)> = HashMap::new();
    for value in values {
        if let Some(key) = value.key_repr() {
            counts.entry(key).or_insert((value, 0)).1 += 1;
        }
    }
    let mut out: Vec<(Value, usize)> = counts
        .into_values()
        .map(|(v, n)| (v.clone(), n))
        .collect();
    out.sort_by(|(va, na), (vb, nb)| nb.cmp(na).then_with(|| va.natural_cmp(vb)));
    out
}

/// Profile `dataset`, reporting the `top_n` most common values of each
/// categorical feature.
pub fn profile(dataset: &Dataset, top_n: usize) -> Profile {
    let rows = dataset.len();

    let missing = dataset
        .columns()
        .iter()
        .map(|f| (*f, dataset.null_count(*f)))
        .filter(|(_, n)| *n > 0)
        .map(|(field, count)| MissingStat {
            field,
            count,
            percent: count as f64 / rows as f64 * 100.0,
        })
        .collect();

    let numeric = dataset
        .available(&NUMERIC_FEATURES)
        .into_iter()
        .filter_map(|field| {
            let values: Vec<f64> = dataset
                .column_values(field)
                .filter_map(Value::as_f64)
                .collect();
            NumericSummary::from_values(&values).map(|s| (field, s))
        })
        .collect();

    let top_model_years = if dataset.has_column(Field::ModelYear) {
        let mut years = value_counts(dataset.column_values(Field::ModelYear));
        years.truncate(3);
        years
    } else {
        Vec::new()
    };

    let distributions = dataset
        .available(&CATEGORICAL_FEATURES)
        .into_iter()
        .map(|field| {
            let mut counts = value_counts(dataset.column_values(field));
            counts.truncate(top_n);
            (field, counts)
        })
        .collect();

    Profile {
        rows,
        columns: dataset.columns().len(),
        missing,
        numeric,
        top_model_years,
        distributions,
    }
}
