use serde::{Deserialize, Serialize};

/// One price bucket of the volume profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBucket {
    /// Inclusive lower price bound
    pub lower: f64,
    /// Exclusive upper price bound (inclusive for the topmost bucket)
    pub upper: f64,
    /// Arithmetic midpoint of the bucket
    pub mid: f64,
    /// Sum of volume for rows whose close falls in this bucket
    pub total_volume: f64,
    /// `total_volume / max_bucket_volume`, in [0, 1]
    pub normalized_volume: f64,
    /// Whether this is one of the two highest-volume buckets
    pub notable: bool,
}

impl PriceBucket {
    /// Display label for the bucket's price range, e.g. `"98.00 - 101.50"`.
    pub fn range_label(&self) -> String {
        format!("{:.2} - {:.2}", self.lower, self.upper)
    }
}

/// Volume-by-price histogram over an enriched series.
///
/// Empty (no buckets) when the underlying series is empty or traded no
/// volume; otherwise holds exactly the configured number of contiguous
/// equal-width buckets spanning the padded price range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumeProfile {
    pub buckets: Vec<PriceBucket>,
    /// Total volume across all buckets
    pub total_volume: f64,
    /// Lower edge of the bucketed price span (0 when empty)
    pub min_price: f64,
    /// Upper edge of the bucketed price span (0 when empty)
    pub max_price: f64,
}

impl VolumeProfile {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The flagged high-liquidity buckets, in bucket order.
    pub fn notable_buckets(&self) -> Vec<&PriceBucket> {
        self.buckets.iter().filter(|b| b.notable).collect()
    }

    pub fn max_bucket_volume(&self) -> f64 {
        self.buckets
            .iter()
            .map(|b| b.total_volume)
            .fold(0.0, f64::max)
    }
}
