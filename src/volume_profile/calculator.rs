use tracing::{debug, warn};

use crate::indicators::structs::EnrichedCandle;
use crate::volume_profile::structs::{PriceBucket, VolumeProfile};

/// Padding factors applied to the observed price extremes so the histogram
/// span covers slightly more than the traded range.
const SPAN_LOW_FACTOR: f64 = 0.98;
const SPAN_HIGH_FACTOR: f64 = 1.02;

/// Number of buckets flagged as notable liquidity zones.
const NOTABLE_BUCKETS: usize = 2;

/// Build the volume-by-price histogram for an enriched series.
///
/// The span `[min(low)·0.98, max(high)·1.02]` is partitioned into
/// `bucket_count` equal-width buckets and each row is assigned to exactly
/// one bucket by its close: the bucket index is the integer part of the
/// normalized offset, so every bucket owns its lower bound, and the topmost
/// bucket additionally owns the upper span edge. Returns an empty profile
/// for an empty series or zero traded volume.
pub fn build_profile(enriched: &[EnrichedCandle], bucket_count: usize) -> VolumeProfile {
    if enriched.is_empty() || bucket_count == 0 {
        return VolumeProfile::empty();
    }

    let total_volume: f64 = enriched.iter().map(|row| row.candle.volume).sum();
    if total_volume <= 0.0 {
        debug!("Zero traded volume across {} rows, profile is empty", enriched.len());
        return VolumeProfile::empty();
    }

    let min_low = enriched
        .iter()
        .map(|row| row.candle.low)
        .fold(f64::INFINITY, f64::min);
    let max_high = enriched
        .iter()
        .map(|row| row.candle.high)
        .fold(f64::NEG_INFINITY, f64::max);

    let span_low = min_low * SPAN_LOW_FACTOR;
    let span_high = max_high * SPAN_HIGH_FACTOR;
    let width = (span_high - span_low) / bucket_count as f64;
    if !(width > 0.0 && width.is_finite()) {
        warn!(
            "Degenerate price span [{}, {}], cannot bucket",
            span_low, span_high
        );
        return VolumeProfile::empty();
    }

    let mut sums = vec![0.0f64; bucket_count];
    for row in enriched {
        let index = bucket_index(row.candle.close - span_low, width, bucket_count);
        sums[index] += row.candle.volume;
    }

    let max_volume = sums.iter().copied().fold(0.0, f64::max);
    let (first, second) = top_two(&sums);

    let buckets = sums
        .iter()
        .enumerate()
        .map(|(i, &volume)| {
            let lower = span_low + i as f64 * width;
            let upper = span_low + (i + 1) as f64 * width;
            PriceBucket {
                lower,
                upper,
                mid: (lower + upper) / 2.0,
                total_volume: volume,
                normalized_volume: if max_volume > 0.0 { volume / max_volume } else { 0.0 },
                notable: Some(i) == first || Some(i) == second,
            }
        })
        .collect();

    VolumeProfile {
        buckets,
        total_volume,
        min_price: span_low,
        max_price: span_high,
    }
}

/// Bucket owning a price at `offset` above the span's lower edge.
///
/// Integer division on the normalized offset makes every bucket own its
/// lower bound (left-inclusive); the clamp hands the span's upper edge to
/// the topmost bucket so no value goes unassigned.
fn bucket_index(offset: f64, width: f64, bucket_count: usize) -> usize {
    ((offset / width) as usize).min(bucket_count - 1)
}

/// Indices of the two largest values, by a single linear scan.
///
/// Ties prefer the lower index: a later value must be strictly greater to
/// displace an earlier one, which keeps the selection deterministic and
/// independent of sorting behavior. With fewer than two values the second
/// slot is `None`.
fn top_two(values: &[f64]) -> (Option<usize>, Option<usize>) {
    let mut first: Option<usize> = None;
    let mut second: Option<usize> = None;

    for (i, &value) in values.iter().enumerate() {
        match first {
            Some(f) if value > values[f] => {
                second = first;
                first = Some(i);
            }
            Some(_) => match second {
                Some(s) if value > values[s] => second = Some(i),
                None => second = Some(i),
                _ => {}
            },
            None => first = Some(i),
        }
    }

    (first, second)
}
