//! Tukey fence outlier detection

use serde::Serialize;

use super::{nearest_rank, sorted_copy};

/// Fence multiplier applied to the interquartile range
const FENCE: f64 = 1.5;

/// Partition of a series into outliers and inliers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierReport {
    /// Values outside the fences, in input order
    pub outliers: Vec<f64>,
    /// Values within the fences (inclusive), in input order
    pub inliers: Vec<f64>,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub iqr: f64,
}

/// Split `data` by the fences `q1 - 1.5 * iqr` and `q3 + 1.5 * iqr`.
///
/// Returns `None` for an empty slice.
pub fn detect_outliers(data: &[f64]) -> Option<OutlierReport> {
    if data.is_empty() {
        return None;
    }

    let sorted = sorted_copy(data);
    let q1 = nearest_rank(&sorted, 0.25);
    let q3 = nearest_rank(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower_bound = q1 - FENCE * iqr;
    let upper_bound = q3 + FENCE * iqr;

    let (inliers, outliers): (Vec<f64>, Vec<f64>) = data
        .iter()
        .partition(|&&v| v >= lower_bound && v <= upper_bound);

    Some(OutlierReport {
        outliers,
        inliers,
        lower_bound,
        upper_bound,
        iqr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_high_outlier() {
        let data = [10.0, 12.0, 11.0, 13.0, 12.0, 11.0, 95.0, 10.0];
        let report = detect_outliers(&data).unwrap();

        // sorted: 10 10 11 11 12 12 13 95 -> q1 = sorted[2], q3 = sorted[6]
        assert_eq!(report.iqr, 2.0);
        assert_eq!(report.lower_bound, 8.0);
        assert_eq!(report.upper_bound, 16.0);
        assert_eq!(report.outliers, vec![95.0]);
        assert_eq!(
            report.inliers,
            vec![10.0, 12.0, 11.0, 13.0, 12.0, 11.0, 10.0]
        );
    }

    #[test]
    fn test_partition_is_exact() {
        let data = [-40.0, 1.0, 2.0, 2.0, 3.0, 50.0, 2.5, 1.5, -1.0];
        let report = detect_outliers(&data).unwrap();

        assert_eq!(report.outliers.len() + report.inliers.len(), data.len());
        for v in &report.outliers {
            assert!(*v < report.lower_bound || *v > report.upper_bound);
        }
        for v in &report.inliers {
            assert!(*v >= report.lower_bound && *v <= report.upper_bound);
        }

        // Order within each side follows the input
        assert_eq!(report.outliers, vec![-40.0, 50.0]);
    }

    #[test]
    fn test_constant_series_has_no_outliers() {
        let report = detect_outliers(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(report.iqr, 0.0);
        assert!(report.outliers.is_empty());
        assert_eq!(report.inliers.len(), 3);
    }

    #[test]
    fn test_empty() {
        assert!(detect_outliers(&[]).is_none());
    }
}
