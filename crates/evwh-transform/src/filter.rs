//! Quality filter: drop records missing a required identifier

use evwh_core::{Dataset, Field};

/// Identifier fields every registration must carry.
pub const REQUIRED_FIELDS: [Field; 3] = [Field::VinPrefix, Field::Make, Field::Model];

/// Result of [`quality_filter`].
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub dataset: Dataset,
    pub removed: usize,
}

/// Keep only the records whose `required` fields are all present.
///
/// An empty string counts as present; only null cells are missing. A required
/// field absent from the input schema is null in every record, so every record
/// is removed.
pub fn quality_filter(dataset: Dataset, required: &[Field]) -> FilterOutcome {
    for field in required {
        if !dataset.has_column(*field) {
            log::warn!(
                "Required field '{}' is missing from the input; every record will be dropped",
                field
            );
        }
    }

    let (columns, records) = dataset.into_parts();
    let before = records.len();
    let kept: Vec<_> = records
        .into_iter()
        .filter(|r| required.iter().all(|f| !r.is_absent(*f)))
        .collect();
    let removed = before - kept.len();

    log::info!(
        "Quality filter removed {} of {} records with missing identifiers",
        removed,
        before
    );

    FilterOutcome {
        dataset: Dataset::new(columns, kept),
        removed,
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
