//! Statistics
//!
//! Pure functions over small in-memory series: descriptive statistics,
//! min-max normalisation, trailing moving averages, Tukey outlier fences
//! and ordinary least squares regression.
//!
//! Quartiles use the nearest-rank rule `sorted[floor(n * p)]` with no
//! interpolation, so `q1`/`q3` always refer to an actual sample.

mod descriptive;
mod error;
mod outliers;
mod regression;

pub use descriptive::{calculate_stats, moving_average, normalize, Stats};
pub use error::{StatsError, StatsResult};
pub use outliers::{detect_outliers, OutlierReport};
pub use regression::{linear_regression, Regression};

/// Ascending copy of `data`. NaN sorts last.
pub(crate) fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Nearest-rank quantile on an already sorted, non-empty slice
pub(crate) fn nearest_rank(sorted: &[f64], fraction: f64) -> f64 {
    let index = (sorted.len() as f64 * fraction).floor() as usize;
    sorted[index.min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_rank_indices() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        // floor(8 * 0.25) = 2, floor(8 * 0.75) = 6
        assert_eq!(nearest_rank(&sorted, 0.25), 3.0);
        assert_eq!(nearest_rank(&sorted, 0.75), 7.0);

        let single = vec![42.0];
        assert_eq!(nearest_rank(&single, 0.25), 42.0);
        assert_eq!(nearest_rank(&single, 0.75), 42.0);
    }

    #[test]
    fn test_sorted_copy_leaves_input() {
        let data = vec![3.0, -1.0, 2.0];
        let sorted = sorted_copy(&data);
        assert_eq!(sorted, vec![-1.0, 2.0, 3.0]);
        assert_eq!(data, vec![3.0, -1.0, 2.0]);
    }
}
