//! Dimensional modeling: dimensions, surrogate keys, and the fact table
//!
//! Dimensions are derived from the same record set the fact table is built
//! from, so every natural key resolved during fact construction exists in
//! its dimension. A lookup miss still falls back to [`FALLBACK_KEY`] and is
//! counted, never fatal.

use evwh_core::{Column, Dataset, Field, FieldKind, Record, Table, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Surrogate key used when a record's natural key has no dimension row.
pub const FALLBACK_KEY: i64 = 1;

/// Fact table name
pub const FACT_TABLE: &str = "fact_ev_registration";

/// Load timestamp column on the fact table
pub const LOAD_DATE_COLUMN: &str = "load_date";

/// Measure and identifier columns carried onto the fact table.
pub const FACT_FIELDS: [Field; 4] = [
    Field::VinPrefix,
    Field::DolVehicleId,
    Field::ElectricRange,
    Field::BaseMsrp,
];

/// Natural-key form shared by dimension build and fact resolution.
type NaturalKey = Vec<Option<String>>;

fn natural_key(values: &[Value]) -> NaturalKey {
    values.iter().map(Value::key_repr).collect()
}

/// The three dimensions of the star schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DimensionRole {
    Vehicle,
    Location,
    Eligibility,
}

impl DimensionRole {
    pub const ALL: [DimensionRole; 3] = [
        DimensionRole::Vehicle,
        DimensionRole::Location,
        DimensionRole::Eligibility,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            DimensionRole::Vehicle => "dim_vehicle",
            DimensionRole::Location => "dim_location",
            DimensionRole::Eligibility => "dim_cafv",
        }
    }

    /// Surrogate key column, shared by the dimension and the fact table.
    pub fn key_column(self) -> &'static str {
        match self {
            DimensionRole::Vehicle => "vehicle_key",
            DimensionRole::Location => "location_key",
            DimensionRole::Eligibility => "cafv_key",
        }
    }

    /// Fields projected into this dimension.
    pub fn projection(self) -> &'static [Field] {
        match self {
            DimensionRole::Vehicle => &[
                Field::Make,
                Field::Model,
                Field::ModelYear,
                Field::ElectricVehicleType,
                Field::EvTypeCode,
                Field::MakeCode,
            ],
            DimensionRole::Location => &[
                Field::County,
                Field::City,
                Field::State,
                Field::PostalCode,
                Field::LegislativeDistrict,
                Field::CensusTract2020,
            ],
            DimensionRole::Eligibility => &[Field::CafvEligibility, Field::CafvCode],
        }
    }
}

impl fmt::Display for DimensionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// A deduplicated dimension with its natural key → surrogate key lookup.
#[derive(Debug, Clone)]
pub struct Dimension {
    pub role: DimensionRole,
    /// Projection fields that were actually available in the input
    pub fields: Vec<Field>,
    /// Distinct projected tuples; row `i` has surrogate key `i + 1`
    rows: Vec<Vec<Value>>,
    lookup: HashMap<NaturalKey, i64>,
}

impl Dimension {
    /// Project, dedupe in first-seen order, and assign keys 1..N.
    ///
    /// Projection fields missing from the dataset are dropped rather than
    /// treated as an error.
    pub fn build(dataset: &Dataset, role: DimensionRole) -> Self {
        let fields = dataset.available(role.projection());
        if fields.len() < role.projection().len() {
            log::warn!(
                "{}: building from {} of {} projection fields",
                role,
                fields.len(),
                role.projection().len()
            );
        }

        let mut rows = Vec::new();
        let mut lookup = HashMap::new();
        for record in dataset.records() {
            let projected = record.project(&fields);
            let key = natural_key(&projected);
            if !lookup.contains_key(&key) {
                rows.push(projected);
                lookup.insert(key, rows.len() as i64);
            }
        }

        Self {
            role,
            fields,
            rows,
            lookup,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Surrogate key of `record`'s projection, if present.
    pub fn lookup(&self, record: &Record) -> Option<i64> {
        self.lookup
            .get(&natural_key(&record.project(&self.fields)))
            .copied()
    }

    /// Materialize as a table: surrogate key first, then the projection.
    pub fn to_table(&self) -> Table {
        let mut columns = vec![Column::new(self.role.key_column(), FieldKind::Integer)];
        columns.extend(self.fields.iter().map(|f| Column::from(*f)));

        let mut table = Table::new(self.role.table_name(), columns);
        for (i, row) in self.rows.iter().enumerate() {
            let mut out = Vec::with_capacity(row.len() + 1);
            out.push(Value::Integer(i as i64 + 1));
            out.extend(row.iter().cloned());
            table.push_row(out);
        }
        table
    }
}

/// Dimension tables plus the fact table for one run.
#[derive(Debug, Clone)]
pub struct StarSchema {
    pub dimensions: Vec<Table>,
    pub fact: Table,
}

impl StarSchema {
    /// All tables in load order: dimensions before the fact table.
    pub fn tables(&self) -> Vec<&Table> {
        self.dimensions.iter().chain(std::iter::once(&self.fact)).collect()
    }

    pub fn dimension(&self, role: DimensionRole) -> Option<&Table> {
        self.dimensions
            .iter()
            .find(|t| t.name.as_str() == role.table_name())
    }
}

/// Result of [`build_star_schema`].
#[derive(Debug, Clone)]
pub struct ModelOutcome {
    pub schema: StarSchema,
    /// Records that fell back to [`FALLBACK_KEY`], per dimension
    pub fallbacks: BTreeMap<DimensionRole, usize>,
}

/// Build the three dimensions and the fact table, stamping every fact row
/// with `load_date`.
pub fn build_star_schema(dataset: &Dataset, load_date: &str) -> ModelOutcome {
    let dimensions: Vec<Dimension> = DimensionRole::ALL
        .iter()
        .map(|role| Dimension::build(dataset, *role))
        .collect();
    for dim in &dimensions {
        log::info!("{}: {} unique rows", dim.role, dim.len());
    }

    let (fact, fallbacks) = build_fact(dataset, &dimensions, load_date);

    ModelOutcome {
        schema: StarSchema {
            dimensions: dimensions.iter().map(Dimension::to_table).collect(),
            fact,
        },
        fallbacks,
    }
}

/// Resolve every record against `dimensions` and stamp it with `load_date`.
///
/// Records whose projection has no row in a dimension get [`FALLBACK_KEY`]
/// and are counted per dimension.
fn build_fact(
    dataset: &Dataset,
    dimensions: &[Dimension],
    load_date: &str,
) -> (Table, BTreeMap<DimensionRole, usize>) {
    let (identifiers, measures): (Vec<Field>, Vec<Field>) = dataset
        .available(&FACT_FIELDS)
        .into_iter()
        .partition(|f| matches!(f, Field::VinPrefix | Field::DolVehicleId));

    let mut columns: Vec<Column> = identifiers.iter().map(|f| Column::from(*f)).collect();
    columns.extend(
        dimensions
            .iter()
            .map(|d| Column::new(d.role.key_column(), FieldKind::Integer)),
    );
    columns.extend(measures.iter().map(|f| Column::from(*f)));
    columns.push(Column::new(LOAD_DATE_COLUMN, FieldKind::Text));

    let mut fact = Table::new(FACT_TABLE, columns);
    let mut fallbacks: BTreeMap<DimensionRole, usize> = BTreeMap::new();
    let stamp = Value::from(load_date);

    for record in dataset.records() {
        let mut row = record.project(&identifiers);
        for dim in dimensions {
            let key = dim.lookup(record).unwrap_or_else(|| {
                *fallbacks.entry(dim.role).or_insert(0) += 1;
                FALLBACK_KEY
            });
            row.push(Value::Integer(key));
        }
        row.extend(record.project(&measures));
        row.push(stamp.clone());
        fact.push_row(row);
    }

    for (role, count) in &fallbacks {
        log::warn!(
            "{}: {} records had no matching row and were assigned key {}",
            role,
            count,
            FALLBACK_KEY
        );
    }
    log::info!("{}: {} rows", FACT_TABLE, fact.len());

    (fact, fallbacks)
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
