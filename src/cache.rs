//! Time-bounded memoization of processed series.
//!
//! Wraps the pure fetch+compute entry point with a TTL cache keyed by
//! `(ticker, date range)`, mirroring the source system's per-request
//! memoization. The cache is orthogonal to the computation itself: it only
//! ever stores what the supplied closure returns.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::indicators::structs::ProcessedSeries;
use crate::series::structs::DateRange;

/// Cache key for processed-series results
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CacheKey {
    pub ticker: String,
    pub range: DateRange,
}

impl CacheKey {
    pub fn new(ticker: impl Into<String>, range: DateRange) -> Self {
        Self {
            ticker: ticker.into(),
            range,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedEntry {
    value: Arc<ProcessedSeries>,
    created_at: Instant,
}

/// Cache performance counters
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub current_entries: usize,
}

impl CacheMetrics {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Configuration for the processed-series cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_entries: 256,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_entries == 0 {
            return Err("max_entries must be positive".to_string());
        }
        Ok(())
    }
}

/// TTL cache over the fetch+compute pipeline.
pub struct ProcessedCache {
    entries: RwLock<FxHashMap<CacheKey, CachedEntry>>,
    metrics: RwLock<CacheMetrics>,
    config: CacheConfig,
}

impl ProcessedCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
            metrics: RwLock::new(CacheMetrics::default()),
            config,
        }
    }

    /// Return the cached result for `key`, or run `compute` and cache its
    /// output. Expired entries are recomputed in place.
    pub fn get_or_compute<F>(&self, key: CacheKey, compute: F) -> Arc<ProcessedSeries>
    where
        F: FnOnce() -> ProcessedSeries,
    {
        if let Some(value) = self.lookup(&key) {
            self.record_hit();
            return value;
        }

        self.record_miss();
        let value = Arc::new(compute());
        self.insert(key, Arc::clone(&value));
        value
    }

    fn lookup(&self, key: &CacheKey) -> Option<Arc<ProcessedSeries>> {
        let entries = self.entries.read().unwrap();
        let entry = entries.get(key)?;
        if entry.created_at.elapsed() > self.config.ttl {
            return None;
        }
        Some(Arc::clone(&entry.value))
    }

    fn insert(&self, key: CacheKey, value: Arc<ProcessedSeries>) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(
            key,
            CachedEntry {
                value,
                created_at: Instant::now(),
            },
        );

        // Drop expired entries, then oldest ones until under the cap.
        let ttl = self.config.ttl;
        let before = entries.len();
        entries.retain(|_, entry| entry.created_at.elapsed() <= ttl);
        let mut evicted = before - entries.len();

        while entries.len() > self.config.max_entries {
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.created_at)
                .map(|(key, _)| key.clone())
            {
                entries.remove(&oldest);
                evicted += 1;
            } else {
                break;
            }
        }

        let mut metrics = self.metrics.write().unwrap();
        metrics.evictions += evicted as u64;
        metrics.current_entries = entries.len();

        if evicted > 0 {
            debug!("Evicted {} cache entries, {} remain", evicted, entries.len());
        }
    }

    /// Drop every cached range for a ticker (e.g. after a data refresh).
    pub fn invalidate_ticker(&self, ticker: &str) {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|key, _| key.ticker != ticker);
        let removed = before - entries.len();

        let mut metrics = self.metrics.write().unwrap();
        metrics.evictions += removed as u64;
        metrics.current_entries = entries.len();
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.metrics.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record_hit(&self) {
        self.metrics.write().unwrap().hits += 1;
    }

    fn record_miss(&self) {
        self.metrics.write().unwrap().misses += 1;
    }
}
