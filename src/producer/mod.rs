//! Producer-side support for ETL collaborators
//!
//! ETL jobs run as independent processes and talk to the loader only through
//! the filesystem. This module gives them the two pieces the file contract
//! requires: an atomic Parquet sink (write-to-temp, then rename, so readers
//! never see a partial file) and deterministic demo snapshot builders for
//! development and CI.

mod demo;
mod sink;

pub use demo::{
    demo_batch, fuelmix, generation, minerals, price_map, queue, TexasBounds, TEXAS_BOUNDS,
};
pub use sink::ParquetSink;
