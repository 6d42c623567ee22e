/// Indicators Module
///
/// The per-request computation pipeline: pivot-point moving averages over a
/// raw OHLCV series (with warm-up filtering) feeding the volume-profile
/// build, plus the standalone chart overlays (returns, Bollinger, MACD,
/// Ichimoku, rebased series).
pub mod engine;
pub mod overlays;
pub mod structs;

pub use engine::IndicatorEngine;
pub use overlays::{
    bollinger, daily_returns, ichimoku, macd, rebase_to_100, BollingerPoint, IchimokuPoint,
    MacdPoint,
};
pub use structs::{EnrichedCandle, IncrementalEma, IndicatorConfig, ProcessedSeries};
