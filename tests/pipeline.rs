//! End-to-end pipeline test: CSV source -> cached compute -> viewport.

use std::fs::File;
use std::io::Write;

use chart_engine::cache::{CacheConfig, CacheKey, ProcessedCache};
use chart_engine::indicators::{IndicatorConfig, IndicatorEngine};
use chart_engine::series::{CsvSeriesSource, DateRange, FetchOutcome, SeriesSource};
use chart_engine::viewport::ViewportTracker;
use chrono::{Days, NaiveDate};
use tempfile::TempDir;

const TICKER: &str = "ACME";
const ROWS: usize = 180;

/// Write a deterministic 180-session fixture: a gently trending close with a
/// repeating volume pattern, one row per calendar day from 2024-01-01.
fn write_fixture(dir: &TempDir) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let path = dir.path().join(format!("{}.csv", TICKER));
    let mut file = File::create(path).unwrap();
    writeln!(file, "date,open,high,low,close,volume").unwrap();

    let mut last = start;
    for i in 0..ROWS {
        let date = start + Days::new(i as u64);
        let close = 100.0 + (i as f64) * 0.25 + ((i % 11) as f64) * 0.8;
        let high = close + 1.5;
        let low = close - 1.5;
        let open = close - 0.5;
        let volume = 1_000.0 + ((i % 7) as f64) * 250.0;
        writeln!(
            file,
            "{},{:.4},{:.4},{:.4},{:.4},{:.0}",
            date, open, high, low, close, volume
        )
        .unwrap();
        last = date;
    }
    (start, last)
}

#[test]
fn test_full_pipeline_from_csv_to_viewport() {
    let dir = TempDir::new().unwrap();
    let (start, end) = write_fixture(&dir);
    let range = DateRange::new(start, end);

    let source = CsvSeriesSource::new(dir.path());
    let outcome = source.fetch(TICKER, range);
    assert!(outcome.is_data());
    let raw = outcome.into_series();
    assert_eq!(raw.len(), ROWS);

    let config = IndicatorConfig {
        periods: vec![10, 21, 63],
        bucket_count: 40,
    };
    let max_period = config.max_period() as usize;
    let engine = IndicatorEngine::new(config);

    let cache = ProcessedCache::new(CacheConfig::default());
    let key = CacheKey::new(TICKER, range);
    let processed = cache.get_or_compute(key.clone(), || engine.compute(&raw));

    // Warm-up drop leaves raw_len - (max_period - 1) rows, in date order.
    assert_eq!(processed.len(), ROWS - (max_period - 1));
    assert!(processed
        .enriched
        .windows(2)
        .all(|pair| pair[0].candle.date < pair[1].candle.date));

    // Profile conservation and normalization.
    let profile = &processed.profile;
    assert_eq!(profile.buckets.len(), 40);
    let bucket_sum: f64 = profile.buckets.iter().map(|b| b.total_volume).sum();
    assert!((bucket_sum - processed.total_volume()).abs() < 1e-6);
    assert_eq!(profile.notable_buckets().len(), 2);
    assert!(profile
        .buckets
        .iter()
        .any(|b| (b.normalized_volume - 1.0).abs() < 1e-12));

    // Second request for the same selection is served from the cache.
    let again = cache.get_or_compute(key, || panic!("cache should have served this"));
    assert_eq!(again.len(), processed.len());
    assert_eq!(cache.metrics().hits, 1);

    // The viewport tracks the enriched series, not the raw one.
    let mut tracker = ViewportTracker::new(processed.len());
    assert_eq!(tracker.end(), processed.len());
    assert_eq!(tracker.start(), 0); // shorter than a trading year

    let visible = tracker.slice(&processed.enriched);
    assert_eq!(visible.len(), processed.len());

    tracker.zoom_in();
    let zoomed = tracker.slice(&processed.enriched);
    assert!(zoomed.len() < processed.len());
    assert_eq!(zoomed.len(), tracker.span());

    tracker.reset();
    assert_eq!(tracker.slice(&processed.enriched).len(), processed.len());
}

#[test]
fn test_selection_change_replaces_viewport_wholesale() {
    let dir = TempDir::new().unwrap();
    let (start, end) = write_fixture(&dir);

    let source = CsvSeriesSource::new(dir.path());
    let engine = IndicatorEngine::new(IndicatorConfig {
        periods: vec![10],
        bucket_count: 20,
    });

    let full = engine.compute(&source.fetch(TICKER, DateRange::new(start, end)).into_series());
    let narrow_end = start + Days::new(59);
    let narrow = engine.compute(
        &source
            .fetch(TICKER, DateRange::new(start, narrow_end))
            .into_series(),
    );
    assert!(narrow.len() < full.len());

    // A new selection gets a brand-new tracker sized to the new series; the
    // old tracker's length never leaks into it.
    let old_tracker = ViewportTracker::new(full.len());
    let new_tracker = ViewportTracker::new(narrow.len());
    assert_eq!(new_tracker.length(), narrow.len());
    assert!(new_tracker.length() < old_tracker.length());
    assert_eq!(new_tracker.slice(&narrow.enriched).len(), narrow.len());
}

#[test]
fn test_degenerate_selections_flow_through_as_empty() {
    let dir = TempDir::new().unwrap();
    let (start, _) = write_fixture(&dir);

    let source = CsvSeriesSource::new(dir.path());
    let engine = IndicatorEngine::new(IndicatorConfig::default());

    // Unknown ticker and out-of-range selection both collapse to empty input.
    let missing = source.fetch("NOSUCH", DateRange::new(start, start));
    assert_eq!(missing, FetchOutcome::InvalidTicker);
    let processed = engine.compute(&missing.into_series());
    assert!(processed.is_empty());
    assert!(processed.profile.is_empty());

    let before = DateRange::new(
        start - Days::new(30),
        start - Days::new(1),
    );
    let no_rows = source.fetch(TICKER, before);
    assert_eq!(no_rows, FetchOutcome::NoData);
    let processed = engine.compute(&no_rows.into_series());
    assert!(processed.is_empty());

    // And the viewport over an empty series is pinned to {0, 0, 0}.
    let mut tracker = ViewportTracker::new(processed.len());
    tracker.zoom_out();
    tracker.reset();
    assert_eq!((tracker.start(), tracker.end(), tracker.length()), (0, 0, 0));
}
