//! Canonical dataset schemas and the normalize → coerce → validate pipeline
//!
//! Source files arrive with heterogeneous column names and types depending on
//! which upstream feed produced them. This module holds the fixed per-dataset
//! contract (ordered column → type mapping plus a column-name alias table) and
//! the three passes that bring an arbitrary table into canonical shape:
//!
//! 1. [`normalize_columns`] — rename aliased columns to canonical names
//! 2. [`coerce_types`] — cast present columns to their declared types,
//!    nulling individual unparsable values
//! 3. [`validate`] — report missing (hard) and extra (informational) columns

mod coerce;
mod datasets;
mod normalize;
mod validate;

pub use coerce::coerce_types;
pub use datasets::{get_schema, ColumnSpec, ColumnType, Dataset, DatasetSchema};
pub use normalize::normalize_columns;
pub use validate::{validate, ValidationReport};
