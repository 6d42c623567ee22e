use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::series::structs::DailyCandle;
use crate::volume_profile::structs::VolumeProfile;

/// Configuration for the indicator pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Pivot-point moving-average windows, in rows
    pub periods: Vec<u32>,
    /// Number of equal-width price buckets in the volume profile
    pub bucket_count: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            periods: vec![28, 55, 84],
            bucket_count: 50,
        }
    }
}

impl IndicatorConfig {
    /// Longest configured window; rows without this much history are dropped.
    pub fn max_period(&self) -> u32 {
        self.periods.iter().copied().max().unwrap_or(0)
    }

    /// Validate configuration for consistency and reasonable values
    pub fn validate(&self) -> Result<(), String> {
        if self.periods.is_empty() {
            return Err("periods must not be empty".to_string());
        }
        if self.periods.iter().any(|&p| p == 0) {
            return Err("periods must all be positive".to_string());
        }
        if self.bucket_count == 0 {
            return Err("bucket_count must be positive".to_string());
        }
        if self.bucket_count > 10_000 {
            return Err(format!(
                "bucket_count must be at most 10000, got {}",
                self.bucket_count
            ));
        }
        Ok(())
    }
}

/// One fully-warmed row of the enriched series.
///
/// `pivot_sma` maps each configured window length to its trailing simple
/// moving average of the pivot point; every configured period is present,
/// rows with incomplete history never make it into the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCandle {
    pub candle: DailyCandle,
    pub pivot_point: f64,
    pub pivot_sma: BTreeMap<u32, f64>,
}

impl EnrichedCandle {
    pub fn pivot_sma(&self, period: u32) -> Option<f64> {
        self.pivot_sma.get(&period).copied()
    }
}

/// Result of one `IndicatorEngine::compute` pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedSeries {
    pub enriched: Vec<EnrichedCandle>,
    pub profile: VolumeProfile,
}

impl ProcessedSeries {
    pub fn empty() -> Self {
        Self {
            enriched: Vec::new(),
            profile: VolumeProfile::empty(),
        }
    }

    pub fn len(&self) -> usize {
        self.enriched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enriched.is_empty()
    }

    pub fn total_volume(&self) -> f64 {
        self.enriched.iter().map(|row| row.candle.volume).sum()
    }
}

/// Incremental EMA calculator that maintains state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementalEma {
    /// EMA period
    pub period: u32,
    /// Smoothing factor (2 / (period + 1))
    pub alpha: f64,
    /// Current EMA value
    pub current_value: Option<f64>,
    /// Count of values processed (for initial SMA calculation)
    pub count: u32,
    /// Sum for initial SMA calculation
    pub sum: f64,
}

impl IncrementalEma {
    pub fn new(period: u32) -> Self {
        let alpha = 2.0 / (period as f64 + 1.0);
        Self {
            period,
            alpha,
            current_value: None,
            count: 0,
            sum: 0.0,
        }
    }

    /// Add a new value and return the updated EMA.
    ///
    /// The first `period` values build a plain SMA which seeds the EMA; until
    /// then the calculator reports `None`.
    pub fn update(&mut self, value: f64) -> Option<f64> {
        self.count += 1;

        if self.count <= self.period {
            self.sum += value;
            if self.count == self.period {
                let sma = self.sum / self.period as f64;
                self.current_value = Some(sma);
                Some(sma)
            } else {
                None
            }
        } else if let Some(prev) = self.current_value {
            let ema = self.alpha * value + (1.0 - self.alpha) * prev;
            self.current_value = Some(ema);
            Some(ema)
        } else {
            None
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.current_value
    }

    pub fn is_ready(&self) -> bool {
        self.current_value.is_some()
    }
}
