//! Data Validation CLI
//!
//! Checks every dataset snapshot under a data directory: the file exists and
//! is readable, the canonical columns survive normalize/coerce, and the file
//! is not empty (the stub datasets are allowed to be). Run by CI before data
//! files are committed.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin validate-data -- --data-dir data
//! cargo run --bin validate-data -- --data-dir data --json
//! ```

use gridfeed::loader::read_parquet;
use gridfeed::schema::{coerce_types, normalize_columns, validate, Dataset};
use gridfeed::telemetry::init_tracing;

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

/// Dataset file validator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the dataset files
    #[arg(long, env = "GRIDFEED_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Status {
    Ok,
    Failed,
    Skipped,
}

#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    dataset: String,
    status: Status,
    rows: Option<usize>,
    missing: Vec<String>,
    extra: Vec<String>,
    detail: Option<String>,
}

/// Stub datasets may legitimately ship empty snapshots.
fn empty_ok(dataset: Dataset) -> bool {
    matches!(dataset, Dataset::Generation | Dataset::Queue)
}

/// Minerals is an optional feed; its absence is a skip, not a failure.
fn optional(dataset: Dataset) -> bool {
    matches!(dataset, Dataset::Minerals)
}

fn validate_file(data_dir: &PathBuf, dataset: Dataset) -> FileReport {
    let file = dataset.file_name().to_string();
    let path = data_dir.join(&file);

    let mut report = FileReport {
        file,
        dataset: dataset.as_str().to_string(),
        status: Status::Ok,
        rows: None,
        missing: Vec::new(),
        extra: Vec::new(),
        detail: None,
    };

    if !path.exists() {
        if optional(dataset) {
            report.status = Status::Skipped;
            report.detail = Some("optional dataset, file not present".to_string());
        } else {
            report.status = Status::Failed;
            report.detail = Some(format!("file not found: {}", path.display()));
        }
        return report;
    }

    let batch = match read_parquet(&path) {
        Ok(batch) => batch,
        Err(e) => {
            report.status = Status::Failed;
            report.detail = Some(format!("unreadable: {e}"));
            return report;
        }
    };
    report.rows = Some(batch.num_rows());

    let batch = normalize_columns(&batch, dataset);
    let batch = match coerce_types(&batch, dataset) {
        Ok(batch) => batch,
        Err(e) => {
            report.status = Status::Failed;
            report.detail = Some(format!("coercion error: {e}"));
            return report;
        }
    };

    let result = validate(&batch, dataset);
    report.missing = result.missing;
    report.extra = result.extra;

    if !report.missing.is_empty() {
        report.status = Status::Failed;
        report.detail = Some("missing required columns".to_string());
        return report;
    }

    if batch.num_rows() == 0 && !empty_ok(dataset) {
        report.status = Status::Failed;
        report.detail = Some("file is empty".to_string());
    }

    report
}

fn print_text_report(reports: &[FileReport]) {
    for report in reports {
        println!("\n{} ({})", report.file, report.dataset);
        match report.status {
            Status::Ok => {
                println!("  ok: {} rows, schema valid", report.rows.unwrap_or(0));
                if report.rows == Some(0) {
                    println!("  note: empty stub file (allowed)");
                }
                if !report.extra.is_empty() {
                    println!("  note: extra columns ignored: {:?}", report.extra);
                }
            }
            Status::Skipped => {
                println!(
                    "  skipped: {}",
                    report.detail.as_deref().unwrap_or("not present")
                );
            }
            Status::Failed => {
                println!(
                    "  FAILED: {}",
                    report.detail.as_deref().unwrap_or("unknown error")
                );
                if !report.missing.is_empty() {
                    println!("  missing columns: {:?}", report.missing);
                }
            }
        }
    }
}

fn main() {
    let args = Args::parse();
    if let Err(e) = init_tracing(&args.log_level) {
        eprintln!("validate-data failed: {e}");
        std::process::exit(1);
    }

    let reports: Vec<FileReport> = Dataset::ALL
        .iter()
        .map(|dataset| validate_file(&args.data_dir, *dataset))
        .collect();

    let failed = reports.iter().filter(|r| r.status == Status::Failed).count();

    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("validate-data failed: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print_text_report(&reports);
        let passed = reports.len() - failed;
        println!("\n{passed}/{} files passed", reports.len());
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
