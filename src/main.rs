use std::env;

use chart_engine::cache::{CacheKey, ProcessedCache};
use chart_engine::config::AppConfig;
use chart_engine::indicators::overlays::daily_returns;
use chart_engine::indicators::IndicatorEngine;
use chart_engine::logging::{init_dual_logging, init_simple_logging, LoggingConfig};
use chart_engine::series::{resample_weekly, CsvSeriesSource, DateRange, SeriesSource};
use chart_engine::viewport::ViewportTracker;
use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// Default selection window when no dates are given (two years).
const DEFAULT_LOOKBACK_DAYS: u64 = 730;

#[derive(Serialize)]
struct NotableBucket {
    price: f64,
    range: String,
    volume: f64,
}

#[derive(Serialize)]
struct ViewportSummary {
    start: usize,
    end: usize,
    length: usize,
}

/// What the dashboard collaborator would receive, printed as JSON.
#[derive(Serialize)]
struct RequestSummary {
    ticker: String,
    status: &'static str,
    range_start: NaiveDate,
    range_end: NaiveDate,
    raw_rows: usize,
    enriched_rows: usize,
    weekly_rows: usize,
    total_volume: f64,
    latest_return_pct: Option<f64>,
    notable_buckets: Vec<NotableBucket>,
    viewport: ViewportSummary,
}

fn parse_date(value: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    Ok(NaiveDate::parse_from_str(value, "%Y-%m-%d")?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: chart_engine <csv-dir> <ticker> [start-date] [end-date]");
        std::process::exit(2);
    }
    let csv_dir = &args[1];
    let ticker = &args[2];

    let config = AppConfig::load_or_default("config.toml")?;

    let level_filter = config
        .logging
        .level_filter
        .clone()
        .unwrap_or_else(|| "info,chart_engine=info".to_string());
    let _guard = if config.logging.file_output {
        let logging_config = LoggingConfig {
            log_dir: config
                .logging
                .log_dir
                .clone()
                .unwrap_or_else(|| "logs".to_string()),
            level_filter,
            ..Default::default()
        };
        Some(init_dual_logging(logging_config).map_err(|e| -> Box<dyn std::error::Error> { e })?)
    } else {
        init_simple_logging(&level_filter).map_err(|e| -> Box<dyn std::error::Error> { e })?;
        None
    };

    let end = match args.get(4) {
        Some(value) => parse_date(value)?,
        None => Utc::now().date_naive(),
    };
    let start = match args.get(3) {
        Some(value) => parse_date(value)?,
        None => end - Days::new(DEFAULT_LOOKBACK_DAYS),
    };
    let range = DateRange::new(start, end);

    info!("Processing {} from {} to {}", ticker, start, end);

    let source = CsvSeriesSource::new(csv_dir);
    let outcome = source.fetch(ticker, range);
    let status = outcome.status_label();
    if !outcome.is_data() {
        warn!("No usable data for {}: {}", ticker, status);
    }
    let raw = outcome.into_series();

    let engine = IndicatorEngine::new(config.engine.clone());
    let cache = ProcessedCache::new(config.cache.clone());
    let processed = cache.get_or_compute(CacheKey::new(ticker.clone(), range), || {
        engine.compute(&raw)
    });

    let tracker = ViewportTracker::with_config(processed.len(), config.viewport);

    let summary = RequestSummary {
        ticker: ticker.clone(),
        status,
        range_start: start,
        range_end: end,
        raw_rows: raw.len(),
        enriched_rows: processed.len(),
        weekly_rows: resample_weekly(&raw).len(),
        total_volume: processed.total_volume(),
        latest_return_pct: daily_returns(&raw).last().copied().flatten(),
        notable_buckets: processed
            .profile
            .notable_buckets()
            .iter()
            .map(|bucket| NotableBucket {
                price: bucket.mid,
                range: bucket.range_label(),
                volume: bucket.total_volume,
            })
            .collect(),
        viewport: ViewportSummary {
            start: tracker.start(),
            end: tracker.end(),
            length: tracker.length(),
        },
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
