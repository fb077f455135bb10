//! Time-bounded memoization for load results
//!
//! An explicit TTL cache keyed by (filename, dataset, leniency). Entries
//! expire purely by age against an injected clock; there is no invalidation
//! on file change. Expired entries are pruned opportunistically on insert.

use super::LoadOutcome;
use crate::schema::Dataset;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache key: one entry per distinct load call shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    pub filename: String,
    pub dataset: Dataset,
    pub allow_empty: bool,
}

struct CacheEntry {
    outcome: LoadOutcome,
    inserted_at: DateTime<Utc>,
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// TTL cache for load outcomes.
///
/// Reads take the shared lock; a populate race between two callers is benign
/// because loads are idempotent, so last insert wins.
pub(crate) struct TtlCache {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TtlCache {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::hours(1)),
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a fresh entry. Expired entries count as misses and are left
    /// for the insert-time prune.
    pub fn get(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<LoadOutcome> {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(entry) if now - entry.inserted_at < self.ttl => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.outcome.clone())
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, key: CacheKey, outcome: LoadOutcome, now: DateTime<Utc>) {
        let mut entries = self.entries.write();
        entries.retain(|_, entry| now - entry.inserted_at < self.ttl);
        entries.insert(
            key,
            CacheEntry {
                outcome,
                inserted_at: now,
            },
        );
    }

    pub fn invalidate(&self, key: &CacheKey) {
        self.entries.write().remove(key);
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.read().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::RecordBatch;

    fn key(name: &str, allow_empty: bool) -> CacheKey {
        CacheKey {
            filename: name.to_string(),
            dataset: Dataset::Fuelmix,
            allow_empty,
        }
    }

    fn outcome() -> LoadOutcome {
        LoadOutcome::Loaded(RecordBatch::new_empty(
            Dataset::Fuelmix.schema().to_arrow(),
        ))
    }

    #[test]
    fn test_hit_within_ttl() {
        let cache = TtlCache::new(std::time::Duration::from_secs(3600));
        let now = Utc::now();

        cache.insert(key("fuelmix.parquet", false), outcome(), now);
        assert!(cache
            .get(&key("fuelmix.parquet", false), now + Duration::minutes(59))
            .is_some());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_expired_entry_misses() {
        let cache = TtlCache::new(std::time::Duration::from_secs(3600));
        let now = Utc::now();

        cache.insert(key("fuelmix.parquet", false), outcome(), now);
        assert!(cache
            .get(&key("fuelmix.parquet", false), now + Duration::minutes(61))
            .is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_leniency_flag_is_part_of_key() {
        let cache = TtlCache::new(std::time::Duration::from_secs(3600));
        let now = Utc::now();

        cache.insert(key("fuelmix.parquet", true), outcome(), now);
        assert!(cache.get(&key("fuelmix.parquet", false), now).is_none());
        assert!(cache.get(&key("fuelmix.parquet", true), now).is_some());
    }

    #[test]
    fn test_insert_prunes_expired() {
        let cache = TtlCache::new(std::time::Duration::from_secs(60));
        let now = Utc::now();

        cache.insert(key("a.parquet", false), outcome(), now);
        cache.insert(
            key("b.parquet", false),
            outcome(),
            now + Duration::minutes(5),
        );
        assert_eq!(cache.stats().entries, 1);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = TtlCache::new(std::time::Duration::from_secs(3600));
        let now = Utc::now();

        cache.insert(key("a.parquet", false), outcome(), now);
        cache.insert(key("b.parquet", false), outcome(), now);

        cache.invalidate(&key("a.parquet", false));
        assert!(cache.get(&key("a.parquet", false), now).is_none());
        assert!(cache.get(&key("b.parquet", false), now).is_some());

        cache.clear();
        assert_eq!(cache.stats().entries, 0);
    }
}
