//! Required-column validation
//!
//! Computes which canonical columns are missing from a table and which table
//! columns fall outside the canonical contract. Pure computation; the loader
//! decides what missing columns mean.

use super::Dataset;
use arrow_array::RecordBatch;
use serde::Serialize;

/// Result of checking a table against a dataset's canonical contract.
///
/// `missing` is ordered by the canonical schema, `extra` is sorted, so
/// reports are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Required columns absent from the table. A hard failure in strict mode.
    pub missing: Vec<String>,
    /// Table columns not declared in the schema. Informational only.
    pub extra: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Compare `batch`'s columns to the canonical contract of `dataset`.
pub fn validate(batch: &RecordBatch, dataset: Dataset) -> ValidationReport {
    let schema = dataset.schema();
    if schema.is_empty() {
        return ValidationReport::default();
    }

    let input = batch.schema();

    let missing = schema
        .column_names()
        .filter(|name| input.index_of(name).is_err())
        .map(String::from)
        .collect();

    let mut extra: Vec<String> = input
        .fields()
        .iter()
        .filter(|field| !schema.has_column(field.name()))
        .map(|field| field.name().clone())
        .collect();
    extra.sort();

    ValidationReport { missing, extra }
}
