//! evwh-transform - Transform stages for the EV registration warehouse
//!
//! Each stage takes an owned [`Dataset`](evwh_core::Dataset) and returns a new
//! one alongside what it did, so stages can be tested in isolation:
//!
//! 1. [`filter`] drops records missing a required identifier
//! 2. [`impute`] fills missing values from a fixed policy table
//! 3. [`encode`] derives dense integer codes for categorical fields
//! 4. [`model`] builds the star schema (three dimensions plus the fact table)
//!
//! [`pipeline`] wires the stages together; [`profile`] computes descriptive
//! statistics and never feeds back into the pipeline.

pub mod encode;
pub mod filter;
pub mod impute;
pub mod model;
pub mod pipeline;
pub mod profile;

pub use encode::{encode, EncodeOutcome, Encoding, EncodingSpec};
pub use filter::{quality_filter, FilterOutcome, REQUIRED_FIELDS};
pub use impute::{impute, Fill, ImputationPolicy, ImputeOutcome};
pub use model::{build_star_schema, Dimension, DimensionRole, ModelOutcome, StarSchema};
pub use pipeline::{run_pipeline, run_pipeline_at, PipelineOptions, PipelineOutput, RunReport};
pub use profile::{profile, NumericSummary, Profile};
