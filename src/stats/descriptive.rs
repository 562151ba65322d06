//! Descriptive statistics, normalisation and moving averages

use serde::Serialize;

use super::{nearest_rank, sorted_copy};

/// Summary of a numeric series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    /// Population variance (divides by `count`)
    pub variance: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub q3: f64,
}

/// Describe a series.
///
/// Returns `None` for an empty slice.
pub fn calculate_stats(data: &[f64]) -> Option<Stats> {
    if data.is_empty() {
        return None;
    }

    let sorted = sorted_copy(data);
    let n = data.len();
    let sum: f64 = data.iter().sum();
    let mean = sum / n as f64;

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let variance = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

    let min = sorted[0];
    let max = sorted[n - 1];

    Some(Stats {
        count: n,
        sum,
        mean,
        median,
        min,
        max,
        range: max - min,
        variance,
        std_dev: variance.sqrt(),
        q1: nearest_rank(&sorted, 0.25),
        q3: nearest_rank(&sorted, 0.75),
    })
}

/// Rescale to [0, 1] by min and max.
///
/// A constant series maps to all zeros.
pub fn normalize(data: &[f64]) -> Vec<f64> {
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    data.iter()
        .map(|v| if range == 0.0 { 0.0 } else { (v - min) / range })
        .collect()
}

/// Trailing moving average.
///
/// Element `i` is the mean of the last `min(window, i + 1)` values, so the
/// output has the same length as the input and starts at `data[0]`.
pub fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);

    (0..data.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let subset = &data[start..=i];
            subset.iter().sum::<f64>() / subset.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_calculate_stats_empty() {
        assert!(calculate_stats(&[]).is_none());
    }

    #[test]
    fn test_calculate_stats_odd() {
        let stats = calculate_stats(&[5.0, 1.0, 3.0, 2.0, 4.0]).unwrap();
        assert_eq!(stats.count, 5);
        assert!(approx(stats.sum, 15.0));
        assert!(approx(stats.mean, 3.0));
        assert!(approx(stats.median, 3.0));
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.range, 4.0);
        assert!(approx(stats.variance, 2.0));
        assert!(approx(stats.std_dev, 2.0_f64.sqrt()));
        // floor(5 * 0.25) = 1, floor(5 * 0.75) = 3
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.q3, 4.0);
    }

    #[test]
    fn test_calculate_stats_even_median() {
        let stats = calculate_stats(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert!(approx(stats.median, 2.5));
        // floor(4 * 0.25) = 1, floor(4 * 0.75) = 3
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.q3, 4.0);
    }

    #[test]
    fn test_calculate_stats_single() {
        let stats = calculate_stats(&[7.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.median, 7.5);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.q1, 7.5);
        assert_eq!(stats.q3, 7.5);
    }

    #[test]
    fn test_calculate_stats_bounds_hold() {
        let series: Vec<Vec<f64>> = vec![
            vec![0.0],
            vec![-3.0, 10.0],
            vec![1.0, 1.0, 1.0, 100.0],
            vec![9.5, -2.25, 3.0, 3.0, 0.0, 12.0, -7.0],
            (0..50).map(|i| ((i * 37) % 11) as f64 - 5.0).collect(),
        ];

        for data in series {
            let stats = calculate_stats(&data).unwrap();
            assert_eq!(stats.count, data.len());
            assert!(stats.min <= stats.median && stats.median <= stats.max);
            assert!(stats.q1 <= stats.q3);
        }
    }

    #[test]
    fn test_calculate_stats_serializes_camel_case() {
        let stats = calculate_stats(&[1.0, 2.0]).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("stdDev").is_some());
        assert_eq!(json["count"], 2);
    }

    #[test]
    fn test_normalize() {
        let out = normalize(&[10.0, 20.0, 15.0, 30.0]);
        assert_eq!(out, vec![0.0, 0.5, 0.25, 1.0]);
        assert!(out.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_normalize_constant_and_empty() {
        assert_eq!(normalize(&[4.0, 4.0, 4.0]), vec![0.0, 0.0, 0.0]);
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_moving_average_shrinking_window() {
        let out = moving_average(&[2.0, 4.0, 6.0, 8.0], 3);
        assert_eq!(out.len(), 4);
        assert!(approx(out[0], 2.0));
        assert!(approx(out[1], 3.0));
        assert!(approx(out[2], 4.0));
        assert!(approx(out[3], 6.0));
    }

    #[test]
    fn test_moving_average_first_element() {
        let data = [3.5, 1.0, 9.0];
        for window in [0, 1, 2, 10] {
            let out = moving_average(&data, window);
            assert_eq!(out.len(), data.len());
            assert_eq!(out[0], 3.5);
        }
        assert_eq!(moving_average(&data, 1), data.to_vec());
    }
}
