//! Type coercion against the canonical schema
//!
//! Casts each canonical column that is present to its declared type.
//! Individual unparsable values become nulls instead of failing the batch
//! (safe casts), and a whole-column cast failure is downgraded to a warning
//! that leaves the column unchanged. Absent columns are skipped, never
//! synthesized.

use super::Dataset;
use crate::Result;
use arrow_array::{ArrayRef, RecordBatch};
use arrow_cast::{cast_with_options, CastOptions};
use arrow_schema::{Field, FieldRef, Schema};
use std::sync::Arc;
use tracing::warn;

/// Coerce every present canonical column of `batch` to its declared type.
pub fn coerce_types(batch: &RecordBatch, dataset: Dataset) -> Result<RecordBatch> {
    let schema = dataset.schema();
    if schema.is_empty() {
        return Ok(batch.clone());
    }

    let input = batch.schema();
    let mut fields: Vec<FieldRef> = input.fields().iter().cloned().collect();
    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
    let options = CastOptions::default(); // safe: unparsable values -> null
    let mut changed = false;

    for spec in schema.columns() {
        let Ok(index) = input.index_of(spec.name) else {
            continue; // absent columns are skipped
        };

        let target = spec.column_type.arrow_type();
        if columns[index].data_type() == &target {
            continue;
        }

        match cast_with_options(&columns[index], &target, &options) {
            Ok(cast) => {
                columns[index] = cast;
                fields[index] = Arc::new(Field::new(spec.name, target, true));
                changed = true;
            }
            Err(e) => {
                warn!(
                    dataset = dataset.as_str(),
                    column = spec.name,
                    declared = spec.column_type.as_str(),
                    "could not coerce column: {e}"
                );
            }
        }
    }

    if !changed {
        return Ok(batch.clone());
    }

    let coerced = Arc::new(Schema::new_with_metadata(fields, input.metadata().clone()));
    Ok(RecordBatch::try_new(coerced, columns)?)
}
