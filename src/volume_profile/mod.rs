/// Volume Profile Module
///
/// Discretizes an enriched series into equal-width price buckets keyed by
/// closing price, aggregates traded volume per bucket, normalizes against
/// the busiest bucket and flags the two highest-volume buckets as notable
/// liquidity zones.
pub mod calculator;
pub mod structs;

pub use calculator::build_profile;
pub use structs::{PriceBucket, VolumeProfile};
