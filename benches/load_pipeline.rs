//! Normalize/coerce pipeline benchmark

use gridfeed::producer::ParquetSink;
use gridfeed::schema::{coerce_types, normalize_columns, Dataset};

use arrow_array::{RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;

/// A legacy-shaped fuel mix batch: alias column names, everything stringly.
fn create_legacy_batch(rows: usize) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("datetime", DataType::Utf8, true),
        Field::new("type-name", DataType::Utf8, true),
        Field::new("value", DataType::Utf8, true),
        Field::new("last_updated", DataType::Utf8, true),
    ]));

    let fuels = ["coal", "natural gas", "nuclear", "wind", "solar", "hydro"];
    let periods: Vec<String> = (0..rows)
        .map(|i| format!("2025-11-{:02}T{:02}:00:00Z", 1 + (i / 24) % 28, i % 24))
        .collect();
    let names: Vec<&str> = (0..rows).map(|i| fuels[i % fuels.len()]).collect();
    let values: Vec<String> = (0..rows).map(|i| format!("{}.5", 1000 + i % 9000)).collect();
    let updated: Vec<&str> = (0..rows).map(|_| "2025-11-03T06:00:00Z").collect();

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(periods)),
            Arc::new(StringArray::from(names)),
            Arc::new(StringArray::from(values)),
            Arc::new(StringArray::from(updated)),
        ],
    )
    .unwrap()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_coerce");
    for rows in [1_000usize, 10_000, 100_000] {
        let batch = create_legacy_batch(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_function(format!("{rows}_rows"), |b| {
            b.iter(|| {
                let normalized = normalize_columns(black_box(&batch), Dataset::Fuelmix);
                coerce_types(&normalized, Dataset::Fuelmix).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_sink(c: &mut Criterion) {
    let sink = ParquetSink::new();
    let batch = coerce_types(
        &normalize_columns(&create_legacy_batch(10_000), Dataset::Fuelmix),
        Dataset::Fuelmix,
    )
    .unwrap();

    let mut group = c.benchmark_group("parquet_sink");
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("write_batch_10k", |b| {
        b.iter(|| sink.write_batch(black_box(&batch)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_sink);
criterion_main!(benches);
