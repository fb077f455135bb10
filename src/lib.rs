//! # gridfeed
//!
//! Schema-validated Parquet data plane for a Texas electricity market
//! dashboard.
//!
//! Independent ETL jobs fetch public market data (fuel mix, settlement
//! prices, generation facilities, interconnection queue, mineral deposits)
//! and drop one Parquet snapshot per dataset into a data directory. The
//! presentation layer never reads those files directly; it goes through this
//! crate, which owns the canonical column contracts and everything needed to
//! hold them.
//!
//! ## Key pieces
//!
//! - **Schema registry**: a closed set of per-dataset records, each holding
//!   the ordered canonical column → type mapping and the alias table for
//!   legacy source column names
//! - **Pipeline**: normalize (alias rename) → coerce (safe casts, nulls for
//!   unparsable values) → validate (missing columns are hard, extras are
//!   informational)
//! - **Cached loader**: the single consumer entry point; TTL-memoized,
//!   with strict/lenient handling of structural failures expressed as a
//!   tagged [`loader::LoadOutcome`] instead of non-local control flow
//! - **Producer sink**: atomic replace-on-write Parquet files, so a reader
//!   never observes a half-written snapshot
//!
//! ## Architecture
//!
//! Producers and the dashboard process share nothing but the filesystem:
//! last fully-written file wins. Loads are synchronous and idempotent, so
//! concurrent cache populates are a benign race.

pub mod clock;
pub mod loader;
pub mod producer;
pub mod schema;
pub mod telemetry;

mod error;

pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::loader::{LoadOutcome, Loader, LoaderConfig};
    pub use crate::producer::ParquetSink;
    pub use crate::schema::{
        coerce_types, get_schema, normalize_columns, validate, Dataset, DatasetSchema,
        ValidationReport,
    };
    pub use crate::{Error, Result};
}
