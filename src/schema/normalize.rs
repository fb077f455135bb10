//! Column name normalization
//!
//! Rewrites source column names to canonical form via the dataset's alias
//! table before any type handling. A pure rename: column data is untouched
//! and columns without an alias entry pass through verbatim.

use super::Dataset;
use arrow_array::RecordBatch;
use arrow_schema::{Field, Schema};
use std::sync::Arc;

/// Rename every aliased column in `batch` to its canonical name.
///
/// Columns with no alias entry keep their name. No columns are added,
/// removed, or reordered, and no data is copied.
pub fn normalize_columns(batch: &RecordBatch, dataset: Dataset) -> RecordBatch {
    let schema = dataset.schema();
    let input = batch.schema();

    if !input
        .fields()
        .iter()
        .any(|f| schema.canonical_name(f.name()).is_some())
    {
        return batch.clone();
    }

    let fields: Vec<Field> = input
        .fields()
        .iter()
        .map(|field| match schema.canonical_name(field.name()) {
            Some(canonical) => field.as_ref().clone().with_name(canonical),
            None => field.as_ref().clone(),
        })
        .collect();

    let renamed = Arc::new(Schema::new_with_metadata(fields, input.metadata().clone()));

    // Types and arrays are unchanged, only names differ, so this cannot fail.
    RecordBatch::try_new(renamed, batch.columns().to_vec())
        .expect("rename preserves column types")
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::{Float64Array, StringArray};
    use arrow_schema::DataType;

    fn batch_with_columns(names: &[&str]) -> RecordBatch {
        let fields: Vec<Field> = names
            .iter()
            .map(|n| Field::new(*n, DataType::Float64, true))
            .collect();
        let columns = names
            .iter()
            .map(|_| Arc::new(Float64Array::from(vec![1.0, 2.0])) as arrow_array::ArrayRef)
            .collect();
        RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).unwrap()
    }

    #[test]
    fn test_aliases_rewritten_to_canonical() {
        let batch = batch_with_columns(&["latitude", "longitude", "capacity"]);
        let normalized = normalize_columns(&batch, Dataset::Queue);

        let schema = normalized.schema();
        let names: Vec<&str> = schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect();
        assert_eq!(names, vec!["lat", "lon", "proposed_mw"]);
    }

    #[test]
    fn test_canonical_and_unknown_columns_pass_through() {
        let batch = batch_with_columns(&["lat", "lon", "source_sheet"]);
        let normalized = normalize_columns(&batch, Dataset::Queue);

        let schema = normalized.schema();
        let names: Vec<&str> = schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect();
        assert_eq!(names, vec!["lat", "lon", "source_sheet"]);
    }

    #[test]
    fn test_no_aliases_returns_same_columns() {
        let batch = batch_with_columns(&["deposit_name", "lat"]);
        let normalized = normalize_columns(&batch, Dataset::Minerals);
        assert_eq!(batch.schema(), normalized.schema());
        assert_eq!(normalized.num_rows(), 2);
    }

    #[test]
    fn test_only_alias_names_yields_exactly_canonical() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("type", DataType::Utf8, true),
            Field::new("value", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["wind", "solar"])),
                Arc::new(Float64Array::from(vec![8000.0, 2100.0])),
            ],
        )
        .unwrap();

        let normalized = normalize_columns(&batch, Dataset::Fuelmix);
        let schema = normalized.schema();
        let names: Vec<&str> = schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect();
        assert_eq!(names, vec!["fuel", "value_mwh"]);
        for name in &names {
            assert!(Dataset::Fuelmix.schema().has_column(name));
        }
    }
}
