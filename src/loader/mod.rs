//! Cached Parquet loader
//!
//! The single entry point consumers use to obtain a dataset's current table.
//! A load resolves the file under the data directory, reads it, runs the
//! normalize → coerce → validate pipeline, and memoizes the result for a
//! fixed time window.
//!
//! Structural failures (missing file, unreadable file, zero rows, missing
//! canonical columns) all branch on the caller's leniency flag: strict mode
//! halts the caller's render cycle with an explanatory message, lenient mode
//! substitutes a schema-shaped empty table (or the partially-valid table) and
//! a warning so the rest of the interface can render around the gap.

mod cache;

pub use cache::CacheStats;

use crate::clock::{Clock, SystemClock};
use crate::schema::{coerce_types, normalize_columns, validate, Dataset};
use crate::Result;
use cache::{CacheKey, TtlCache};

use arrow::compute::concat_batches;
use arrow_array::{Array, RecordBatch, StringArray};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default memoization window for load results.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Loader configuration
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory the dataset files live in
    pub data_dir: PathBuf,
    /// How long a load result stays memoized
    pub cache_ttl: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Outcome of a single load call.
///
/// Callers branch explicitly instead of relying on non-local control flow;
/// a halt abandons the current render cycle, never the process.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// File read, normalized, coerced, and validated clean.
    Loaded(RecordBatch),
    /// Lenient mode substituted an empty or partially-valid table.
    Degraded {
        batch: RecordBatch,
        /// User-visible warning describing the substitution
        reason: String,
    },
    /// Strict mode: processing for this data source stops here.
    Halted {
        /// User-visible message naming the dataset and expected schema
        message: String,
    },
}

impl LoadOutcome {
    /// The table, if this outcome carries one.
    pub fn batch(&self) -> Option<&RecordBatch> {
        match self {
            Self::Loaded(batch) | Self::Degraded { batch, .. } => Some(batch),
            Self::Halted { .. } => None,
        }
    }

    pub fn into_batch(self) -> Option<RecordBatch> {
        match self {
            Self::Loaded(batch) | Self::Degraded { batch, .. } => Some(batch),
            Self::Halted { .. } => None,
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, Self::Halted { .. })
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// TTL-cached, schema-validating Parquet loader.
pub struct Loader {
    config: LoaderConfig,
    cache: TtlCache,
    clock: Arc<dyn Clock>,
}

impl Loader {
    /// Create a loader over the system clock.
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a loader with an injected clock, used by tests to drive cache
    /// expiry deterministically.
    pub fn with_clock(config: LoaderConfig, clock: Arc<dyn Clock>) -> Self {
        let cache = TtlCache::new(config.cache_ttl);
        Self {
            config,
            cache,
            clock,
        }
    }

    /// Absolute path of `filename` under the data directory.
    pub fn data_path(&self, filename: &str) -> PathBuf {
        self.config.data_dir.join(filename)
    }

    /// Load `dataset` from its canonical file name.
    pub fn load_dataset(&self, dataset: Dataset, allow_empty: bool) -> LoadOutcome {
        self.load(dataset.file_name(), dataset, allow_empty)
    }

    /// Load and validate a Parquet file, memoizing the result.
    ///
    /// Results are keyed by (filename, dataset, leniency); a fresh cache
    /// entry skips the filesystem entirely. Halted outcomes are recomputed
    /// per call so a repaired file is picked up without waiting out the TTL.
    pub fn load(&self, filename: &str, dataset: Dataset, allow_empty: bool) -> LoadOutcome {
        let key = CacheKey {
            filename: filename.to_string(),
            dataset,
            allow_empty,
        };

        if let Some(outcome) = self.cache.get(&key, self.clock.now()) {
            debug!(filename, dataset = dataset.as_str(), "cache hit");
            return outcome;
        }

        let outcome = self.load_uncached(filename, dataset, allow_empty);
        if !outcome.is_halted() {
            self.cache.insert(key, outcome.clone(), self.clock.now());
        }
        outcome
    }

    /// Cache counters for this loader.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every memoized result.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn load_uncached(&self, filename: &str, dataset: Dataset, allow_empty: bool) -> LoadOutcome {
        let path = self.data_path(filename);

        if !path.exists() {
            return self.structural_failure(
                dataset,
                allow_empty,
                format!("data file not found: {}", path.display()),
            );
        }

        let batch = match read_parquet(&path) {
            Ok(batch) => batch,
            Err(e) => {
                return self.structural_failure(
                    dataset,
                    allow_empty,
                    format!("error reading `{}`: {}", filename, e),
                );
            }
        };

        if batch.num_rows() == 0 {
            return self.structural_failure(
                dataset,
                allow_empty,
                format!("`{}` contains no rows", filename),
            );
        }

        let batch = normalize_columns(&batch, dataset);
        let batch = match coerce_types(&batch, dataset) {
            Ok(batch) => batch,
            Err(e) => {
                return self.structural_failure(
                    dataset,
                    allow_empty,
                    format!("error coercing `{}`: {}", filename, e),
                );
            }
        };

        let report = validate(&batch, dataset);

        if !report.extra.is_empty() {
            info!(
                filename,
                dataset = dataset.as_str(),
                extra = ?report.extra,
                "extra columns ignored"
            );
        }

        if !report.is_valid() {
            let reason = format!(
                "missing required columns in `{}`: {:?}",
                filename, report.missing
            );
            if allow_empty {
                warn!(dataset = dataset.as_str(), "{reason}");
                // Callers in lenient mode must tolerate missing columns.
                return LoadOutcome::Degraded { batch, reason };
            }
            return LoadOutcome::Halted {
                message: format!(
                    "{}; expected schema for `{}`: {}",
                    reason,
                    dataset.as_str(),
                    dataset.schema().describe()
                ),
            };
        }

        debug!(
            filename,
            dataset = dataset.as_str(),
            rows = batch.num_rows(),
            "loaded"
        );
        LoadOutcome::Loaded(batch)
    }

    fn structural_failure(
        &self,
        dataset: Dataset,
        allow_empty: bool,
        reason: String,
    ) -> LoadOutcome {
        if allow_empty {
            warn!(
                dataset = dataset.as_str(),
                "{reason}; substituting empty table"
            );
            return LoadOutcome::Degraded {
                batch: RecordBatch::new_empty(dataset.schema().to_arrow()),
                reason,
            };
        }
        LoadOutcome::Halted {
            message: format!(
                "{}; expected schema for `{}`: {}",
                reason,
                dataset.as_str(),
                dataset.schema().describe()
            ),
        }
    }
}

/// Read a whole Parquet file into a single record batch.
///
/// Used by the loader and by tooling that inspects snapshot files directly.
pub fn read_parquet(path: &Path) -> Result<RecordBatch> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

/// First non-null `last_updated` value of a table, as displayed in footers.
pub fn last_updated(batch: &RecordBatch) -> Option<String> {
    let index = batch.schema().index_of("last_updated").ok()?;
    let column = batch
        .column(index)
        .as_any()
        .downcast_ref::<StringArray>()?;
    (0..column.len())
        .find(|&i| !column.is_null(i))
        .map(|i| column.value(i).to_string())
}
