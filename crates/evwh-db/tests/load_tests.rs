//! Full-replace loading of a star schema

use evwh_core::{Dataset, Field, Record, Table};
use evwh_db::{DbError, DuckDbBackend, MemoryWarehouse, Warehouse};
use evwh_transform::{run_pipeline, PipelineOptions, StarSchema};

fn schema() -> StarSchema {
    let records = vec![
        Record::new()
            .with(Field::VinPrefix, "5YJ3E1EA7K")
            .with(Field::Make, "TESLA")
            .with(Field::Model, "MODEL 3")
            .with(Field::ModelYear, 2019i64)
            .with(Field::County, "King")
            .with(Field::CensusTract2020, 53033007800i64)
            .with(Field::CafvEligibility, "Clean Alternative Fuel Vehicle Eligible"),
        Record::new()
            .with(Field::VinPrefix, "1N4AZ0CP8D")
            .with(Field::Make, "NISSAN")
            .with(Field::Model, "LEAF"),
    ];
    let dataset = Dataset::new(
        vec![
            Field::VinPrefix,
            Field::Make,
            Field::Model,
            Field::ModelYear,
            Field::County,
            Field::CensusTract2020,
            Field::CafvEligibility,
        ],
        records,
    );
    run_pipeline(dataset, &PipelineOptions::default()).schema
}

#[test]
fn test_dimensions_load_before_fact() {
    let schema = schema();
    let warehouse = MemoryWarehouse::new();
    let written = warehouse.replace_all(&schema.tables()).unwrap();

    assert_eq!(
        warehouse.write_log(),
        vec!["dim_vehicle", "dim_location", "dim_cafv", "fact_ev_registration"]
    );
    assert_eq!(written.last().unwrap(), &("fact_ev_registration".to_string(), 2));
}

#[test]
fn test_failed_write_aborts_without_rollback() {
    let schema = schema();
    let warehouse = MemoryWarehouse::failing_on("dim_cafv");
    let err = warehouse.replace_all(&schema.tables()).unwrap_err();

    assert!(matches!(err, DbError::ExecutionError(_)));
    // earlier tables stay written, later ones never start
    assert_eq!(warehouse.write_log(), vec!["dim_vehicle", "dim_location"]);
    assert!(!warehouse.table_exists("fact_ev_registration").unwrap());
}

#[test]
fn test_star_schema_round_trips_through_duckdb() {
    let schema = schema();
    let db = DuckDbBackend::in_memory().unwrap();
    db.replace_all(&schema.tables()).unwrap();

    for table in schema.tables() {
        assert_eq!(db.row_count(table.name.as_str()).unwrap(), table.len());
    }

    let orphans: i64 = db
        .conn()
        .query_row(
            "SELECT COUNT(*) FROM fact_ev_registration f
             LEFT JOIN dim_vehicle v ON f.vehicle_key = v.vehicle_key
             LEFT JOIN dim_location l ON f.location_key = l.location_key
             LEFT JOIN dim_cafv c ON f.cafv_key = c.cafv_key
             WHERE v.vehicle_key IS NULL OR l.location_key IS NULL OR c.cafv_key IS NULL",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);

    let tract: i64 = db
        .conn()
        .query_row(
            r#"SELECT "2020_census_tract" FROM dim_location WHERE county = 'Unknown'"#,
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tract, -1);
}

#[test]
fn test_second_load_replaces_first() {
    let db = DuckDbBackend::in_memory().unwrap();
    let first = schema();
    db.replace_all(&first.tables()).unwrap();
    let second = schema();
    db.replace_all(&second.tables()).unwrap();
    assert_eq!(db.row_count("fact_ev_registration").unwrap(), 2);
    assert_eq!(db.row_count("dim_vehicle").unwrap(), 2);
}

#[test]
fn test_memory_row_count_missing_table() {
    let warehouse = MemoryWarehouse::new();
    let empty: Vec<&Table> = vec![];
    assert!(warehouse.replace_all(&empty).unwrap().is_empty());
    assert!(matches!(
        warehouse.row_count("dim_vehicle"),
        Err(DbError::TableNotFound(_))
    ));
}
