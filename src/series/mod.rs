/// Series Module
///
/// Daily OHLCV row types, the data-source collaborator boundary and
/// daily-to-weekly resampling. Everything downstream (indicators, volume
/// profile, viewport) consumes the types defined here.
pub mod errors;
pub mod resample;
pub mod source;
pub mod structs;

pub use errors::SeriesError;
pub use resample::resample_weekly;
pub use source::{CsvSeriesSource, FetchOutcome, SeriesSource};
pub use structs::{DailyCandle, DateRange};
