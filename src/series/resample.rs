use chrono::Datelike;
use tracing::debug;

use crate::series::structs::DailyCandle;

/// Aggregate daily candles into ISO-week candles.
///
/// Aggregation rules per week: open never changes (first session's open),
/// high/low fold to the extremes, close tracks the latest session, volume
/// accumulates. The week candle is dated by its last session present in the
/// input. Input is assumed date-ordered; output preserves that order.
pub fn resample_weekly(daily: &[DailyCandle]) -> Vec<DailyCandle> {
    let mut weekly: Vec<DailyCandle> = Vec::new();
    let mut current_week: Option<(i32, u32)> = None;

    for candle in daily {
        let iso = candle.date.iso_week();
        let week_key = (iso.year(), iso.week());

        if current_week != Some(week_key) {
            // Starting a new week
            current_week = Some(week_key);
            weekly.push(candle.clone());
        } else if let Some(current) = weekly.last_mut() {
            current.high = current.high.max(candle.high);
            current.low = current.low.min(candle.low);
            current.close = candle.close;
            current.volume += candle.volume;
            current.date = candle.date;
        }
    }

    debug!("Resampled {} daily rows into {} weekly rows", daily.len(), weekly.len());
    weekly
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candle(date: &str, open: f64, high: f64, low: f64, close: f64, volume: f64) -> DailyCandle {
        DailyCandle::new_from_values(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open,
            high,
            low,
            close,
            volume,
        )
    }

    #[test]
    fn test_empty_input() {
        assert!(resample_weekly(&[]).is_empty());
    }

    #[test]
    fn test_single_week_folds_to_one_candle() {
        // 2024-01-01 is a Monday; all five sessions share ISO week 1.
        let daily = vec![
            candle("2024-01-01", 10.0, 11.0, 9.0, 10.5, 100.0),
            candle("2024-01-02", 10.5, 12.0, 10.0, 11.0, 200.0),
            candle("2024-01-03", 11.0, 11.5, 8.5, 9.0, 300.0),
            candle("2024-01-04", 9.0, 10.0, 8.8, 9.5, 150.0),
            candle("2024-01-05", 9.5, 10.5, 9.2, 10.2, 250.0),
        ];

        let weekly = resample_weekly(&daily);
        assert_eq!(weekly.len(), 1);

        let week = &weekly[0];
        assert_eq!(week.open, 10.0);
        assert_eq!(week.high, 12.0);
        assert_eq!(week.low, 8.5);
        assert_eq!(week.close, 10.2);
        assert_eq!(week.volume, 1000.0);
        assert_eq!(week.date, daily[4].date);
    }

    #[test]
    fn test_week_boundary_splits() {
        let daily = vec![
            candle("2024-01-05", 10.0, 11.0, 9.0, 10.5, 100.0), // Friday, week 1
            candle("2024-01-08", 10.5, 12.0, 10.0, 11.0, 200.0), // Monday, week 2
            candle("2024-01-09", 11.0, 13.0, 10.5, 12.5, 300.0),
        ];

        let weekly = resample_weekly(&daily);
        assert_eq!(weekly.len(), 2);
        assert_eq!(weekly[0].volume, 100.0);
        assert_eq!(weekly[1].open, 10.5);
        assert_eq!(weekly[1].high, 13.0);
        assert_eq!(weekly[1].close, 12.5);
    }

    #[test]
    fn test_volume_is_conserved() {
        let daily: Vec<DailyCandle> = (1..=28)
            .map(|d| candle(&format!("2024-02-{:02}", d), 10.0, 11.0, 9.0, 10.0, d as f64))
            .collect();

        let weekly = resample_weekly(&daily);
        let daily_total: f64 = daily.iter().map(|c| c.volume).sum();
        let weekly_total: f64 = weekly.iter().map(|c| c.volume).sum();
        assert_eq!(daily_total, weekly_total);
    }

    #[test]
    fn test_iso_week_spans_year_end() {
        // 2024-12-30 and 2025-01-03 both fall in ISO week 1 of 2025.
        let daily = vec![
            candle("2024-12-30", 10.0, 11.0, 9.0, 10.5, 100.0),
            candle("2025-01-03", 10.5, 12.0, 10.0, 11.0, 200.0),
        ];

        let weekly = resample_weekly(&daily);
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0].volume, 300.0);
    }
}
