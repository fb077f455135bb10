//! Dataset registry
//!
//! One record per dataset: the ordered canonical column → type mapping plus
//! the alias table that maps legacy source column names onto canonical ones.
//! The registry is closed and immutable for the process lifetime.

use arrow_schema::{DataType, Field, Schema, SchemaRef, TimeUnit};
use std::sync::Arc;

/// Semantic column types a dataset schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Timestamp with UTC timezone, nanosecond precision
    TimestampUtc,
    /// 64-bit float
    Float64,
    /// UTF-8 string
    Utf8,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TimestampUtc => "timestamp[utc]",
            Self::Float64 => "float64",
            Self::Utf8 => "string",
        }
    }

    /// The Arrow data type this column is stored as.
    pub fn arrow_type(&self) -> DataType {
        match self {
            Self::TimestampUtc => DataType::Timestamp(TimeUnit::Nanosecond, Some("UTC".into())),
            Self::Float64 => DataType::Float64,
            Self::Utf8 => DataType::Utf8,
        }
    }
}

/// A canonical column and its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub column_type: ColumnType,
}

impl ColumnSpec {
    const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self { name, column_type }
    }

    /// Convert to an Arrow field. Every column is nullable: source data is
    /// best-effort and coercion introduces nulls for unparsable values.
    pub fn to_field(&self) -> Field {
        Field::new(self.name, self.column_type.arrow_type(), true)
    }
}

/// The canonical column contract and alias table for one dataset.
#[derive(Debug)]
pub struct DatasetSchema {
    columns: &'static [ColumnSpec],
    aliases: &'static [(&'static str, &'static str)],
}

impl DatasetSchema {
    /// Ordered canonical columns.
    pub fn columns(&self) -> &'static [ColumnSpec] {
        self.columns
    }

    /// Canonical column names, in schema order.
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().map(|c| c.name)
    }

    /// Number of canonical columns. Zero only for the unknown-dataset schema.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Declared type of a canonical column.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.column_type)
    }

    /// Check if a column is part of the canonical contract.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Resolve a source column name through the alias table.
    ///
    /// Returns the canonical name for a known alias, `None` otherwise.
    /// Alias targets are themselves canonical columns of this dataset.
    pub fn canonical_name(&self, source: &str) -> Option<&'static str> {
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == source)
            .map(|(_, canonical)| *canonical)
    }

    pub fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        self.aliases
    }

    /// Build the Arrow schema for a canonical, zero-extra-column table.
    pub fn to_arrow(&self) -> SchemaRef {
        let fields: Vec<Field> = self.columns.iter().map(|c| c.to_field()).collect();
        Arc::new(Schema::new(fields))
    }

    /// Human-readable `name: type` listing, used in loader error messages.
    pub fn describe(&self) -> String {
        self.columns
            .iter()
            .map(|c| format!("{}: {}", c.name, c.column_type.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

use ColumnType::{Float64, TimestampUtc, Utf8};

static FUELMIX: DatasetSchema = DatasetSchema {
    columns: &[
        ColumnSpec::new("period", TimestampUtc),
        ColumnSpec::new("fuel", Utf8),
        ColumnSpec::new("value_mwh", Float64),
        ColumnSpec::new("last_updated", Utf8),
    ],
    aliases: &[
        ("type", "fuel"),
        ("type-name", "fuel"),
        ("value", "value_mwh"),
        ("datetime", "period"),
        ("timestamp", "period"),
    ],
};

static PRICE_MAP: DatasetSchema = DatasetSchema {
    columns: &[
        ColumnSpec::new("node_id", Utf8),
        ColumnSpec::new("lat", Float64),
        ColumnSpec::new("lon", Float64),
        ColumnSpec::new("price_cperkwh", Float64),
        ColumnSpec::new("region", Utf8),
        ColumnSpec::new("last_updated", Utf8),
    ],
    aliases: &[
        ("node", "node_id"),
        ("latitude", "lat"),
        ("longitude", "lon"),
        ("price", "price_cperkwh"),
    ],
};

static GENERATION: DatasetSchema = DatasetSchema {
    columns: &[
        ColumnSpec::new("plant_name", Utf8),
        ColumnSpec::new("lat", Float64),
        ColumnSpec::new("lon", Float64),
        ColumnSpec::new("capacity_mw", Float64),
        ColumnSpec::new("fuel", Utf8),
        ColumnSpec::new("last_updated", Utf8),
    ],
    aliases: &[
        ("name", "plant_name"),
        ("latitude", "lat"),
        ("longitude", "lon"),
        ("capacity", "capacity_mw"),
        ("type", "fuel"),
    ],
};

static QUEUE: DatasetSchema = DatasetSchema {
    columns: &[
        ColumnSpec::new("project_name", Utf8),
        ColumnSpec::new("lat", Float64),
        ColumnSpec::new("lon", Float64),
        ColumnSpec::new("proposed_mw", Float64),
        ColumnSpec::new("fuel", Utf8),
        ColumnSpec::new("status", Utf8),
        ColumnSpec::new("last_updated", Utf8),
    ],
    aliases: &[
        ("name", "project_name"),
        ("project", "project_name"),
        ("latitude", "lat"),
        ("longitude", "lon"),
        ("capacity", "proposed_mw"),
        ("capacity_mw", "proposed_mw"),
        ("type", "fuel"),
    ],
};

static MINERALS: DatasetSchema = DatasetSchema {
    columns: &[
        ColumnSpec::new("deposit_name", Utf8),
        ColumnSpec::new("lat", Float64),
        ColumnSpec::new("lon", Float64),
        ColumnSpec::new("minerals", Utf8),
        ColumnSpec::new("estimated_tonnage", Float64),
        ColumnSpec::new("development_status", Utf8),
        ColumnSpec::new("county", Utf8),
        ColumnSpec::new("details", Utf8),
        ColumnSpec::new("color", Utf8),
        ColumnSpec::new("radius", Float64),
        ColumnSpec::new("tooltip", Utf8),
        ColumnSpec::new("data_source", Utf8),
        ColumnSpec::new("last_updated", Utf8),
    ],
    aliases: &[],
};

static EMPTY: DatasetSchema = DatasetSchema {
    columns: &[],
    aliases: &[],
};

/// The datasets this crate serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// ERCOT hourly generation by fuel type
    Fuelmix,
    /// Settlement point prices with node coordinates
    PriceMap,
    /// Operating generation facilities
    Generation,
    /// Interconnection queue projects
    Queue,
    /// Mineral deposit sites
    Minerals,
}

impl Dataset {
    /// All datasets, in registry order.
    pub const ALL: [Dataset; 5] = [
        Dataset::Fuelmix,
        Dataset::PriceMap,
        Dataset::Generation,
        Dataset::Queue,
        Dataset::Minerals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fuelmix => "fuelmix",
            Self::PriceMap => "price_map",
            Self::Generation => "generation",
            Self::Queue => "queue",
            Self::Minerals => "minerals",
        }
    }

    /// Canonical file name under the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Fuelmix => "fuelmix.parquet",
            Self::PriceMap => "price_map.parquet",
            Self::Generation => "generation.parquet",
            Self::Queue => "queue.parquet",
            Self::Minerals => "minerals_deposits.parquet",
        }
    }

    /// The canonical schema record for this dataset.
    pub fn schema(&self) -> &'static DatasetSchema {
        match self {
            Self::Fuelmix => &FUELMIX,
            Self::PriceMap => &PRICE_MAP,
            Self::Generation => &GENERATION,
            Self::Queue => &QUEUE,
            Self::Minerals => &MINERALS,
        }
    }

    /// Parse a dataset name, returning `None` for unknown names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fuelmix" => Some(Self::Fuelmix),
            "price_map" => Some(Self::PriceMap),
            "generation" => Some(Self::Generation),
            "queue" => Some(Self::Queue),
            "minerals" => Some(Self::Minerals),
            _ => None,
        }
    }
}

impl std::str::FromStr for Dataset {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!(
                "unknown dataset '{}'; expected one of fuelmix, price_map, generation, queue, minerals",
                value
            )
        })
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up a dataset schema by name.
///
/// Unknown names get the empty schema rather than an error, so callers that
/// feed arbitrary dataset strings through the pipeline see a no-op instead of
/// a failure.
pub fn get_schema(dataset: &str) -> &'static DatasetSchema {
    match Dataset::parse(dataset) {
        Some(d) => d.schema(),
        None => &EMPTY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_datasets_have_nonempty_schema() {
        for dataset in Dataset::ALL {
            assert!(
                !dataset.schema().is_empty(),
                "{} must declare columns",
                dataset
            );
        }
    }

    #[test]
    fn test_get_schema_unknown_name_is_empty() {
        assert!(get_schema("telemetry").is_empty());
        assert!(get_schema("").is_empty());
        assert_eq!(get_schema("fuelmix").len(), 4);
    }

    #[test]
    fn test_alias_targets_are_canonical() {
        for dataset in Dataset::ALL {
            let schema = dataset.schema();
            for (alias, canonical) in schema.aliases() {
                assert!(
                    schema.has_column(canonical),
                    "{}: alias '{}' points at non-canonical column '{}'",
                    dataset,
                    alias,
                    canonical
                );
            }
        }
    }

    #[test]
    fn test_canonical_names_unique_within_dataset() {
        for dataset in Dataset::ALL {
            let mut seen = std::collections::HashSet::new();
            for name in dataset.schema().column_names() {
                assert!(seen.insert(name), "{}: duplicate column '{}'", dataset, name);
            }
        }
    }

    #[test]
    fn test_parse_round_trips() {
        for dataset in Dataset::ALL {
            assert_eq!(Dataset::parse(dataset.as_str()), Some(dataset));
        }
        assert_eq!(Dataset::parse("PRICE_MAP"), Some(Dataset::PriceMap));
        assert_eq!(Dataset::parse("nope"), None);
    }

    #[test]
    fn test_arrow_schema_types() {
        let arrow = Dataset::Fuelmix.schema().to_arrow();
        assert_eq!(
            arrow.field_with_name("period").unwrap().data_type(),
            &DataType::Timestamp(TimeUnit::Nanosecond, Some("UTC".into()))
        );
        assert_eq!(
            arrow.field_with_name("value_mwh").unwrap().data_type(),
            &DataType::Float64
        );
        assert_eq!(
            arrow.field_with_name("fuel").unwrap().data_type(),
            &DataType::Utf8
        );
    }

    #[test]
    fn test_queue_aliases_resolve() {
        let schema = Dataset::Queue.schema();
        assert_eq!(schema.canonical_name("name"), Some("project_name"));
        assert_eq!(schema.canonical_name("capacity"), Some("proposed_mw"));
        assert_eq!(schema.canonical_name("project_name"), None);
        assert_eq!(schema.canonical_name("county"), None);
    }
}
