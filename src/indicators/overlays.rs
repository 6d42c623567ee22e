//! Standalone chart overlays computed over the raw series.
//!
//! Every overlay is aligned to its input by index, with warm-up and shifted
//! values carried as explicit `Option`s rather than sentinel numbers. All
//! functions are pure.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::indicators::structs::IncrementalEma;
use crate::series::structs::DailyCandle;

/// Day-over-day percentage change of the close; `None` for the first row.
pub fn daily_returns(series: &[DailyCandle]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(series.len());
    let mut previous: Option<f64> = None;
    for candle in series {
        out.push(previous.map(|prev| (candle.close - prev) / prev * 100.0));
        previous = Some(candle.close);
    }
    out
}

/// Closes rescaled so the first row reads exactly 100.
///
/// The normalized "spaghetti chart" form used to compare tickers on one
/// axis. Empty input yields an empty output.
pub fn rebase_to_100(series: &[DailyCandle]) -> Vec<f64> {
    match series.first() {
        Some(first) if first.close != 0.0 => {
            let base = first.close;
            series.iter().map(|c| c.close * 100.0 / base).collect()
        }
        _ => Vec::new(),
    }
}

/// One row of Bollinger bands: 20-period close average with 2σ and 3σ bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerPoint {
    pub middle: f64,
    pub upper_2: f64,
    pub lower_2: f64,
    pub upper_3: f64,
    pub lower_3: f64,
}

/// Bollinger bands over the close with the given window.
///
/// Standard deviation is the population deviation of the same window that
/// feeds the middle band. `None` until the window fills.
pub fn bollinger(series: &[DailyCandle], period: u32) -> Vec<Option<BollingerPoint>> {
    let period = period as usize;
    let mut out = Vec::with_capacity(series.len());
    if period == 0 {
        out.resize(series.len(), None);
        return out;
    }

    let mut window: VecDeque<f64> = VecDeque::with_capacity(period);
    let mut sum = 0.0;
    let mut sum_sq = 0.0;

    for candle in series {
        let close = candle.close;
        sum += close;
        sum_sq += close * close;
        window.push_back(close);
        if window.len() > period {
            if let Some(dropped) = window.pop_front() {
                sum -= dropped;
                sum_sq -= dropped * dropped;
            }
        }

        if window.len() == period {
            let mean = sum / period as f64;
            // Guard the subtraction against negative float residue.
            let variance = (sum_sq / period as f64 - mean * mean).max(0.0);
            let std_dev = variance.sqrt();
            out.push(Some(BollingerPoint {
                middle: mean,
                upper_2: mean + 2.0 * std_dev,
                lower_2: mean - 2.0 * std_dev,
                upper_3: mean + 3.0 * std_dev,
                lower_3: mean - 3.0 * std_dev,
            }));
        } else {
            out.push(None);
        }
    }
    out
}

/// One row of the MACD oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacdPoint {
    /// Fast EMA minus slow EMA, once both are seeded
    pub macd: Option<f64>,
    /// Signal EMA of the MACD line
    pub signal: Option<f64>,
}

/// MACD line and signal over the close.
///
/// Both EMAs are SMA-seeded, so the MACD line first appears once the slow
/// window fills and the signal a further `signal_period` rows later.
pub fn macd(
    series: &[DailyCandle],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Vec<MacdPoint> {
    let mut fast = IncrementalEma::new(fast_period);
    let mut slow = IncrementalEma::new(slow_period);
    let mut signal = IncrementalEma::new(signal_period);

    series
        .iter()
        .map(|candle| {
            let fast_value = fast.update(candle.close);
            let slow_value = slow.update(candle.close);
            let macd_value = match (fast_value, slow_value) {
                (Some(f), Some(s)) => Some(f - s),
                _ => None,
            };
            let signal_value = macd_value.and_then(|m| signal.update(m));
            MacdPoint {
                macd: macd_value,
                signal: signal_value,
            }
        })
        .collect()
}

/// One row of the Ichimoku system, aligned to the input index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IchimokuPoint {
    /// 9-period high/low midpoint (conversion line)
    pub tenkan: Option<f64>,
    /// 26-period high/low midpoint (base line)
    pub kijun: Option<f64>,
    /// (tenkan + kijun) / 2, displaced 26 rows forward
    pub senkou_a: Option<f64>,
    /// 52-period high/low midpoint, displaced 26 rows forward
    pub senkou_b: Option<f64>,
    /// Close displaced 26 rows backward
    pub chikou: Option<f64>,
}

const TENKAN_PERIOD: usize = 9;
const KIJUN_PERIOD: usize = 26;
const SENKOU_B_PERIOD: usize = 52;
const ICHIMOKU_SHIFT: usize = 26;

/// Ichimoku overlay with the standard 9/26/52 windows and 26-row
/// displacement.
pub fn ichimoku(series: &[DailyCandle]) -> Vec<IchimokuPoint> {
    let len = series.len();
    let tenkan = window_midpoint(series, TENKAN_PERIOD);
    let kijun = window_midpoint(series, KIJUN_PERIOD);
    let senkou_b_raw = window_midpoint(series, SENKOU_B_PERIOD);

    (0..len)
        .map(|i| {
            let senkou_source = i.checked_sub(ICHIMOKU_SHIFT);
            let senkou_a = senkou_source.and_then(|src| match (tenkan[src], kijun[src]) {
                (Some(t), Some(k)) => Some((t + k) / 2.0),
                _ => None,
            });
            let senkou_b = senkou_source.and_then(|src| senkou_b_raw[src]);
            let chikou = series.get(i + ICHIMOKU_SHIFT).map(|c| c.close);

            IchimokuPoint {
                tenkan: tenkan[i],
                kijun: kijun[i],
                senkou_a,
                senkou_b,
                chikou,
            }
        })
        .collect()
}

/// Trailing (max high + min low) / 2 over `period` rows, `None` during
/// warm-up.
fn window_midpoint(series: &[DailyCandle], period: usize) -> Vec<Option<f64>> {
    (0..series.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let window = &series[i + 1 - period..=i];
            let high = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
            let low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
            Some((high + low) / 2.0)
        })
        .collect()
}
