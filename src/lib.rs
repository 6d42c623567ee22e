//! Computation core of a market-analysis charting suite.
//!
//! Consumes daily OHLCV series from a pluggable data source, derives
//! pivot-point moving-average overlays plus a volume-by-price histogram,
//! and tracks a zoomable viewport over the enriched series. Rendering,
//! data fetching over HTTP and UI wiring live in external collaborators.

pub mod cache;
pub mod config;
pub mod indicators;
pub mod logging;
pub mod series;
pub mod viewport;
pub mod volume_profile;

pub use cache::{CacheConfig, ProcessedCache};
pub use indicators::{IndicatorConfig, IndicatorEngine, ProcessedSeries};
pub use series::{CsvSeriesSource, DailyCandle, DateRange, FetchOutcome, SeriesSource};
pub use viewport::{Viewport, ViewportConfig, ViewportTracker};
pub use volume_profile::{PriceBucket, VolumeProfile};
