use chrono::{Datelike, Duration, Utc};
use rand::Rng;

use crate::model::{AprPoint, Provenance, VolumePoint};

pub const SYNTHETIC_DAYS: usize = 30;

/// Sinusoidal swing applied to approximated volume
const VOLUME_WAVE: f64 = 0.2;

/// Random swing applied to approximated volume, kept small enough that
/// wave + jitter stays within ±30% of the base
const VOLUME_JITTER: f64 = 0.09;

/// Sinusoidal swing applied to approximated APR
const APR_WAVE: f64 = 0.05;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct",
    "Nov", "Dec",
];

/// Splits "(a,b),(c,d)" into ["a,b", "c,d"]
pub fn parse_tuple_string(data: String) -> Vec<String> {
    let trimmed = data.trim();
    let str = trimmed.strip_prefix('(').unwrap_or(trimmed);
    let splited = str.split(",(");
    let mut items: Vec<String> = Vec::new();

    for c in splited {
        if let Some(index) = c.find(')') {
            let tuple_data = &c[0..index];
            items.push(tuple_data.trim().to_owned());
        }
    }

    items
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Monthly series ending at the current month, oldest first
pub fn generate_historical_data(
    base_value: f64,
    variation_percent: f64,
    months: usize,
) -> Vec<(String, f64)> {
    generate_historical_data_from(
        Utc::now().month0() as usize,
        base_value,
        variation_percent,
        months,
    )
}

pub fn generate_historical_data_from(
    current_month0: usize,
    base_value: f64,
    variation_percent: f64,
    months: usize,
) -> Vec<(String, f64)> {
    let mut data: Vec<(String, f64)> = (0..months)
        .map(|i| {
            let month_index = (current_month0 + 12 - (i % 12)) % 12;
            let variation =
                1.0 + (month_index as f64).sin() * variation_percent / 100.0;
            let value = (base_value * variation).round();

            (MONTH_NAMES[month_index].to_owned(), value)
        })
        .collect();

    data.reverse();
    data
}

/// The `days` calendar days ending yesterday, as YYYY-MM-DD
pub fn daily_dates(days: usize) -> Vec<String> {
    let today = Utc::now().date_naive();

    (0..days)
        .map(|i| {
            let date = today - Duration::days((days - i) as i64);
            date.format("%Y-%m-%d").to_string()
        })
        .collect()
}

/// 30 days of volume around `base_volume`
pub fn approximate_volume_series<R: Rng>(
    base_volume: f64,
    rng: &mut R,
) -> Vec<VolumePoint> {
    daily_dates(SYNTHETIC_DAYS)
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            let wave = (i as f64 * 0.4).sin() * VOLUME_WAVE;
            let jitter = rng.gen_range(-VOLUME_JITTER..=VOLUME_JITTER);
            let volume = (base_volume * (1.0 + wave + jitter)).round();

            VolumePoint::new(date, volume, None, Provenance::APPROXIMATED)
        })
        .collect()
}

/// 30 days of APR around `base_apr`, one decimal
pub fn approximate_apr_series(base_apr: f64) -> Vec<AprPoint> {
    daily_dates(SYNTHETIC_DAYS)
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            let variation = 1.0 + (i as f64 * 0.4).sin() * APR_WAVE;
            AprPoint::new(
                date,
                round_to(base_apr * variation, 1),
                Provenance::APPROXIMATED,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_parse_tuple_string() {
        let items = parse_tuple_string(String::from(
            "(0xabc,0.0005,15000000,12000000),(0xdef,0.003,5000000,15000000)",
        ));
        assert_eq!(
            items,
            vec!["0xabc,0.0005,15000000,12000000", "0xdef,0.003,5000000,15000000"]
        );
        assert!(parse_tuple_string(String::new()).is_empty());
    }

    #[test]
    fn test_historical_data_is_chronological() {
        // March (month0 = 2): the series should end on "Mar"
        let data = generate_historical_data_from(2, 12_000_000.0, 25.0, 12);
        assert_eq!(data.len(), 12);
        assert_eq!(data.last().unwrap().0, "Mar");
        assert_eq!(data.first().unwrap().0, "Apr");

        for (_, value) in &data {
            assert!(*value >= 9_000_000.0 && *value <= 15_000_000.0);
        }

        // January has month index 0, sin(0) = 0
        let january = data.iter().find(|(m, _)| m == "Jan").unwrap();
        assert_eq!(january.1, 12_000_000.0);
    }

    #[test]
    fn test_daily_dates_end_yesterday() {
        let dates = daily_dates(30);
        let yesterday = (Utc::now().date_naive() - Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();

        assert_eq!(dates.len(), 30);
        assert_eq!(dates.last().unwrap(), &yesterday);
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_volume_series_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let base = 15_000_000.0;
        let series = approximate_volume_series(base, &mut rng);

        assert_eq!(series.len(), SYNTHETIC_DAYS);
        for point in series {
            assert!((point.volume - base).abs() < base * 0.3);
            assert_eq!(point.real, Some(false));
            assert_eq!(point.approximated, Some(true));
        }
    }

    #[test]
    fn test_apr_series_rounding() {
        let series = approximate_apr_series(4.2);
        assert_eq!(series.len(), SYNTHETIC_DAYS);
        assert_eq!(series[0].apr, 4.2);
        for point in &series {
            assert_eq!(point.apr, round_to(point.apr, 1));
            assert!(point.apr >= 3.9 && point.apr <= 4.5);
            assert_eq!(point.approximated, Some(true));
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.2345, 2), 1.23);
        assert_eq!(round_to(8.96, 1), 9.0);
    }
}
