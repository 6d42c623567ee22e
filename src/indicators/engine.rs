use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, info};

use crate::indicators::structs::{EnrichedCandle, IndicatorConfig, ProcessedSeries};
use crate::series::structs::DailyCandle;
use crate::volume_profile::calculator::build_profile;

/// Per-request indicator pipeline.
///
/// `compute` is a pure function of its input: degenerate series (empty,
/// shorter than the longest window, zero total volume) come back as empty or
/// trivial outputs, never as errors. Callers branch on emptiness.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Enrich a raw series with pivot-point moving averages and derive its
    /// volume profile.
    pub fn compute(&self, raw: &[DailyCandle]) -> ProcessedSeries {
        if raw.is_empty() {
            debug!("Empty raw series, nothing to compute");
            return ProcessedSeries::empty();
        }

        let pivots: Vec<f64> = raw.iter().map(|c| c.pivot_point()).collect();

        // One rolling-mean pass per configured window, aligned to the raw rows.
        let averaged: Vec<(u32, Vec<Option<f64>>)> = self
            .config
            .periods
            .iter()
            .map(|&p| (p, rolling_mean(&pivots, p)))
            .collect();

        // Keep only rows where every window is warmed up, in input order.
        let mut enriched: Vec<EnrichedCandle> = Vec::new();
        for (i, candle) in raw.iter().enumerate() {
            let mut pivot_sma = BTreeMap::new();
            for (period, values) in &averaged {
                if let Some(value) = values[i] {
                    pivot_sma.insert(*period, value);
                }
            }
            if pivot_sma.len() == averaged.len() {
                enriched.push(EnrichedCandle {
                    candle: candle.clone(),
                    pivot_point: pivots[i],
                    pivot_sma,
                });
            }
        }

        let profile = build_profile(&enriched, self.config.bucket_count);

        info!(
            "Computed series: {} raw rows, {} enriched, {} profile buckets",
            raw.len(),
            enriched.len(),
            profile.buckets.len()
        );

        ProcessedSeries { enriched, profile }
    }
}

/// Trailing simple moving average with window `period`.
///
/// Output is aligned to the input: index `i` holds the mean over rows
/// `i - period + 1 ..= i`, or `None` while the window is still filling.
fn rolling_mean(values: &[f64], period: u32) -> Vec<Option<f64>> {
    let period = period as usize;
    let mut out = Vec::with_capacity(values.len());
    if period == 0 {
        out.resize(values.len(), None);
        return out;
    }

    let mut window: VecDeque<f64> = VecDeque::with_capacity(period);
    let mut sum = 0.0;
    for &value in values {
        sum += value;
        window.push_back(value);
        if window.len() > period {
            if let Some(dropped) = window.pop_front() {
                sum -= dropped;
            }
        }
        if window.len() == period {
            out.push(Some(sum / period as f64));
        } else {
            out.push(None);
        }
    }
    out
}
