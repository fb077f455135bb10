//! Demo Data Generator
//!
//! Writes deterministic demo snapshots for local development, so the
//! dashboard renders without credentials for the real feeds.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin datagen -- --data-dir data --days 7
//! cargo run --bin datagen -- --datasets fuelmix,queue
//! ```

use gridfeed::producer::{demo_batch, ParquetSink};
use gridfeed::schema::Dataset;
use gridfeed::telemetry::init_tracing;

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Demo snapshot generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to write dataset files into
    #[arg(long, env = "GRIDFEED_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Datasets to generate (comma-separated); defaults to all
    #[arg(long, value_delimiter = ',')]
    datasets: Vec<Dataset>,

    /// Days of hourly history for the fuel mix dataset
    #[arg(long, default_value = "7")]
    days: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("datagen failed: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> gridfeed::Result<()> {
    init_tracing(&args.log_level)?;

    let datasets = if args.datasets.is_empty() {
        Dataset::ALL.to_vec()
    } else {
        args.datasets
    };

    let sink = ParquetSink::new();
    let now = chrono::Utc::now();

    for dataset in datasets {
        let batch = demo_batch(dataset, args.days, now)?;
        let path = sink.write_dataset(&batch, &args.data_dir, dataset)?;
        info!(
            dataset = dataset.as_str(),
            rows = batch.num_rows(),
            path = %path.display(),
            "snapshot written"
        );
    }

    Ok(())
}
