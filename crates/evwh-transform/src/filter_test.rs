use super::*;
use evwh_core::{Record, Value};

fn rec(vin: Option<&str>, make: Option<&str>, model: Option<&str>) -> Record {
    Record::new()
        .with(Field::VinPrefix, vin)
        .with(Field::Make, make)
        .with(Field::Model, model)
}

fn dataset(records: Vec<Record>) -> Dataset {
    Dataset::new(vec![Field::VinPrefix, Field::Make, Field::Model], records)
}

#[test]
fn test_drops_records_missing_any_required_field() {
    let ds = dataset(vec![
        rec(Some("V1"), Some("TESLA"), Some("MODEL 3")),
        rec(None, Some("FORD"), Some("F-150")),
        rec(Some("V3"), None, Some("LEAF")),
        rec(Some("V4"), Some("KIA"), None),
    ]);
    let outcome = quality_filter(ds, &REQUIRED_FIELDS);
    assert_eq!(outcome.removed, 3);
    assert_eq!(outcome.dataset.len(), 1);
    assert_eq!(
        outcome.dataset.records()[0].get(Field::VinPrefix),
        &Value::from("V1")
    );
}

#[test]
fn test_no_required_field_absent_after_filter() {
    let ds = dataset(vec![
        rec(Some("V1"), Some("A"), Some("B")),
        rec(Some("V2"), None, None),
        rec(None, None, None),
        rec(Some(""), Some("C"), Some("D")),
    ]);
    let outcome = quality_filter(ds, &REQUIRED_FIELDS);
    for record in outcome.dataset.records() {
        for field in REQUIRED_FIELDS {
            assert!(!record.is_absent(field));
        }
    }
    // empty string is present, not missing
    assert_eq!(outcome.dataset.len(), 2);
}

#[test]
fn test_empty_result_is_valid() {
    let ds = dataset(vec![rec(None, None, None)]);
    let outcome = quality_filter(ds, &REQUIRED_FIELDS);
    assert!(outcome.dataset.is_empty());
    assert_eq!(outcome.removed, 1);
    assert_eq!(outcome.dataset.columns().len(), 3);
}

#[test]
fn test_required_column_missing_from_schema_drops_everything() {
    let ds = Dataset::new(
        vec![Field::Make, Field::Model],
        vec![Record::new().with(Field::Make, "KIA").with(Field::Model, "EV6")],
    );
    let outcome = quality_filter(ds, &REQUIRED_FIELDS);
    assert_eq!(outcome.removed, 1);
}

#[test]
fn test_empty_required_set_keeps_everything() {
    let ds = dataset(vec![rec(None, None, None)]);
    let outcome = quality_filter(ds, &[]);
    assert_eq!(outcome.removed, 0);
    assert_eq!(outcome.dataset.len(), 1);
}
