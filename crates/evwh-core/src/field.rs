//! Declared field schema for the vehicle-registration dataset.
//!
//! Every column the pipeline understands is listed exactly once in
//! [`FIELD_DEFS`] with its source header, canonical name, accepted aliases, and
//! semantic kind. Downstream stages address columns through [`Field`], never
//! through raw strings, so two spellings of the same logical column can never
//! drift into two different canonical names.

use serde::{Serialize, Serializer};
use std::fmt;

/// Semantic type of a field's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text / categorical
    Text,
    /// 64-bit signed integer
    Integer,
    /// 64-bit float
    Float,
}

impl FieldKind {
    /// SQL column type used when the field is written to the warehouse
    pub fn sql_type(self) -> &'static str {
        match self {
            FieldKind::Text => "VARCHAR",
            FieldKind::Integer => "BIGINT",
            FieldKind::Float => "DOUBLE",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Float => write!(f, "float"),
        }
    }
}

/// A recognized column of the registration dataset.
///
/// The declaration order matches [`FIELD_DEFS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    VinPrefix,
    County,
    City,
    State,
    PostalCode,
    ModelYear,
    Make,
    Model,
    ElectricVehicleType,
    CafvEligibility,
    ElectricRange,
    BaseMsrp,
    LegislativeDistrict,
    DolVehicleId,
    VehicleLocation,
    ElectricUtility,
    CensusTract2020,
    EvTypeCode,
    MakeCode,
    CafvCode,
}

/// Static description of one field.
#[derive(Debug)]
pub struct FieldDef {
    pub field: Field,
    /// Header as published by the source, `None` for derived fields
    pub source_header: Option<&'static str>,
    pub canonical: &'static str,
    /// Other canonical spellings that resolve to this field
    pub aliases: &'static [&'static str],
    pub kind: FieldKind,
}

const fn def(
    field: Field,
    source_header: Option<&'static str>,
    canonical: &'static str,
    aliases: &'static [&'static str],
    kind: FieldKind,
) -> FieldDef {
    FieldDef {
        field,
        source_header,
        canonical,
        aliases,
        kind,
    }
}

/// The canonical-name table, indexed by `Field as usize`.
pub static FIELD_DEFS: [FieldDef; 20] = [
    def(Field::VinPrefix, Some("VIN (1-10)"), "vin_1-10", &[], FieldKind::Text),
    def(Field::County, Some("County"), "county", &[], FieldKind::Text),
    def(Field::City, Some("City"), "city", &[], FieldKind::Text),
    def(Field::State, Some("State"), "state", &[], FieldKind::Text),
    def(Field::PostalCode, Some("Postal Code"), "postal_code", &[], FieldKind::Text),
    def(Field::ModelYear, Some("Model Year"), "model_year", &[], FieldKind::Integer),
    def(Field::Make, Some("Make"), "make", &[], FieldKind::Text),
    def(Field::Model, Some("Model"), "model", &[], FieldKind::Text),
    def(
        Field::ElectricVehicleType,
        Some("Electric Vehicle Type"),
        "electric_vehicle_type",
        &[],
        FieldKind::Text,
    ),
    def(
        Field::CafvEligibility,
        Some("Clean Alternative Fuel Vehicle (CAFV) Eligibility"),
        "clean_alternative_fuel_vehicle_cafv_eligibility",
        &["clean_alternative_fuel_vehicle_cafv__eligibility"],
        FieldKind::Text,
    ),
    def(Field::ElectricRange, Some("Electric Range"), "electric_range", &[], FieldKind::Integer),
    def(Field::BaseMsrp, Some("Base MSRP"), "base_msrp", &[], FieldKind::Float),
    def(
        Field::LegislativeDistrict,
        Some("Legislative District"),
        "legislative_district",
        &[],
        FieldKind::Integer,
    ),
    def(Field::DolVehicleId, Some("DOL Vehicle ID"), "dol_vehicle_id", &[], FieldKind::Integer),
    def(Field::VehicleLocation, Some("Vehicle Location"), "vehicle_location", &[], FieldKind::Text),
    def(Field::ElectricUtility, Some("Electric Utility"), "electric_utility", &[], FieldKind::Text),
    def(
        Field::CensusTract2020,
        Some("2020 Census Tract"),
        "2020_census_tract",
        &["_2020_census_tract", "census_tract_2020"],
        FieldKind::Integer,
    ),
    def(Field::EvTypeCode, None, "ev_type_code", &[], FieldKind::Integer),
    def(Field::MakeCode, None, "make_code", &[], FieldKind::Integer),
    def(Field::CafvCode, None, "cafv_code", &[], FieldKind::Integer),
];

impl Field {
    /// All fields in declaration order.
    pub const ALL: [Field; 20] = [
        Field::VinPrefix,
        Field::County,
        Field::City,
        Field::State,
        Field::PostalCode,
        Field::ModelYear,
        Field::Make,
        Field::Model,
        Field::ElectricVehicleType,
        Field::CafvEligibility,
        Field::ElectricRange,
        Field::BaseMsrp,
        Field::LegislativeDistrict,
        Field::DolVehicleId,
        Field::VehicleLocation,
        Field::ElectricUtility,
        Field::CensusTract2020,
        Field::EvTypeCode,
        Field::MakeCode,
        Field::CafvCode,
    ];

    /// Static definition of this field.
    pub fn def(self) -> &'static FieldDef {
        &FIELD_DEFS[self as usize]
    }

    /// Canonical (warehouse) column name.
    pub fn canonical_name(self) -> &'static str {
        self.def().canonical
    }

    /// Header as published by the source dataset.
    pub fn source_header(self) -> Option<&'static str> {
        self.def().source_header
    }

    pub fn kind(self) -> FieldKind {
        self.def().kind
    }

    /// Derived fields are computed by the pipeline, never ingested.
    pub fn is_derived(self) -> bool {
        self.def().source_header.is_none()
    }

    /// Look up a field by an already-canonical name or one of its aliases.
    pub fn from_canonical(name: &str) -> Option<Field> {
        FIELD_DEFS
            .iter()
            .find(|d| d.canonical == name || d.aliases.contains(&name))
            .map(|d| d.field)
    }

    /// Resolve a raw source header to a non-derived field.
    ///
    /// The header is canonicalized first, then matched against canonical names
    /// and aliases.
    pub fn resolve_header(header: &str) -> Option<Field> {
        Self::from_canonical(&canonicalize(header)).filter(|f| !f.is_derived())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.canonical_name())
    }
}

/// Canonicalize a column header for warehouse compatibility.
///
/// Strips parentheses, trims surrounding whitespace, lowercases, and replaces
/// spaces and slashes with underscores. Parentheses go first so that
/// whitespace they enclosed is still trimmed, which keeps the function
/// idempotent.
pub fn canonicalize(name: &str) -> String {
    let stripped: String = name.chars().filter(|c| *c != '(' && *c != ')').collect();
    stripped
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '/' { '_' } else { c })
        .collect()
}

#[cfg(test)]
#[path = "field_test.rs"]
mod tests;
