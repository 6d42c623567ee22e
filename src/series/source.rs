use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::series::errors::SeriesError;
use crate::series::structs::{DailyCandle, DateRange};

/// Result of asking the data-source collaborator for a ticker's history.
///
/// Failure modes travel as data, never as errors: the compute layer treats
/// every non-`Series` outcome as an empty raw series, while the presentation
/// layer keeps the distinction for user-facing messaging.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Rows for the requested range, sorted by date (oldest first).
    Series(Vec<DailyCandle>),
    /// The symbol is known but has no rows in the requested range.
    NoData,
    /// The symbol is not recognized by the source.
    InvalidTicker,
    /// Transient or unexpected failure, with a message for the UI.
    FetchError(String),
}

impl FetchOutcome {
    /// Collapse to a raw series: every non-data outcome becomes empty.
    pub fn into_series(self) -> Vec<DailyCandle> {
        match self {
            FetchOutcome::Series(rows) => rows,
            _ => Vec::new(),
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, FetchOutcome::Series(_))
    }

    /// Short status label for logs and UI status lines.
    pub fn status_label(&self) -> &'static str {
        match self {
            FetchOutcome::Series(_) => "ok",
            FetchOutcome::NoData => "no_data",
            FetchOutcome::InvalidTicker => "invalid_ticker",
            FetchOutcome::FetchError(_) => "fetch_error",
        }
    }
}

/// Data-source collaborator boundary.
///
/// Implementations own all I/O; the computation core only ever sees the
/// returned `FetchOutcome`.
pub trait SeriesSource {
    fn fetch(&self, ticker: &str, range: DateRange) -> FetchOutcome;
}

/// CSV-backed series source: one `<TICKER>.csv` file per symbol under a data
/// directory, with `date,open,high,low,close,volume` columns (header names
/// matched case-insensitively).
#[derive(Debug, Clone)]
pub struct CsvSeriesSource {
    data_dir: PathBuf,
}

impl CsvSeriesSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn ticker_path(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", ticker))
    }

    /// Read and parse every row of a ticker file, sorted by date.
    fn read_candles(&self, path: &Path) -> Result<Vec<DailyCandle>, SeriesError> {
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        let column = |name: &str| -> Result<usize, SeriesError> {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| SeriesError::MissingColumn(name.to_string()))
        };

        let date_idx = column("date")?;
        let open_idx = column("open")?;
        let high_idx = column("high")?;
        let low_idx = column("low")?;
        let close_idx = column("close")?;
        let volume_idx = column("volume")?;

        let mut candles = Vec::new();
        for record in reader.records() {
            let record = record?;
            let field = |idx: usize| record.get(idx).unwrap_or_default();

            let date = NaiveDate::parse_from_str(field(date_idx), "%Y-%m-%d")?;
            let candle = DailyCandle::new_from_values(
                date,
                field(open_idx).parse()?,
                field(high_idx).parse()?,
                field(low_idx).parse()?,
                field(close_idx).parse()?,
                field(volume_idx).parse()?,
            );

            if candle.low > candle.high || candle.volume < 0.0 {
                warn!(
                    "Skipping malformed row for {}: low {} high {} volume {}",
                    date, candle.low, candle.high, candle.volume
                );
                continue;
            }

            candles.push(candle);
        }

        // Rows should already be in date order but ensure it
        candles.sort_by_key(|c| c.date);
        candles.dedup_by_key(|c| c.date);

        Ok(candles)
    }
}

impl SeriesSource for CsvSeriesSource {
    fn fetch(&self, ticker: &str, range: DateRange) -> FetchOutcome {
        let path = self.ticker_path(ticker);
        if !path.exists() {
            info!("No data file for ticker {} at {}", ticker, path.display());
            return FetchOutcome::InvalidTicker;
        }

        let candles = match self.read_candles(&path) {
            Ok(candles) => candles,
            Err(e) => {
                warn!("Failed to read series for {}: {}", ticker, e);
                return FetchOutcome::FetchError(e.to_string());
            }
        };

        let in_range: Vec<DailyCandle> = candles
            .into_iter()
            .filter(|c| range.contains(c.date))
            .collect();

        if in_range.is_empty() {
            return FetchOutcome::NoData;
        }

        debug!(
            "Loaded {} rows for {} ({} to {})",
            in_range.len(),
            ticker,
            range.start,
            range.end
        );
        FetchOutcome::Series(in_range)
    }
}
