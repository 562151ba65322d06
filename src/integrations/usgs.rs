//! USGS Water Services Integration
//!
//! Fetches instantaneous discharge (parameter 00060, cubic feet per second)
//! for a gauge site and summarises the series.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use serde_json::Value;

use super::client::{ApiClient, ClientResult};
use crate::stats::{
    calculate_stats, detect_outliers, linear_regression, moving_average, Regression, Stats,
};

/// Discharge parameter code
pub const DISCHARGE_PARAMETER: &str = "00060";

/// Sentinel USGS uses for missing values
const NO_DATA: f64 = -999999.0;

/// Longest lookback accepted for a streamflow request, in days
pub const MAX_DAYS: u32 = 120;

/// One discharge observation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamflowReading {
    pub date_time: String,
    pub discharge: f64,
}

/// Summary of a discharge series
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamflowSummary {
    pub site: String,
    pub site_name: Option<String>,
    pub readings: usize,
    pub stats: Option<Stats>,
    pub outlier_count: usize,
    pub lower_fence: Option<f64>,
    pub upper_fence: Option<f64>,
    /// Least squares trend of discharge against sample index
    pub trend: Option<Regression>,
    pub smoothed: Vec<f64>,
}

impl ApiClient {
    /// Raw instantaneous-values response for `site` between two dates
    pub async fn usgs_streamflow(
        &self,
        site: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ClientResult<Value> {
        let url = format!(
            "{}/iv/?format=json&sites={}&startDT={}&endDT={}&parameterCd={}",
            self.endpoints().usgs,
            urlencoding::encode(site),
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            DISCHARGE_PARAMETER,
        );
        self.fetch_json(&url).await
    }
}

/// Start and end dates covering `days` days back from `end`.
///
/// None when `days` is 0 or above [`MAX_DAYS`].
pub fn lookback(end: NaiveDate, days: u32) -> Option<(NaiveDate, NaiveDate)> {
    if days == 0 || days > MAX_DAYS {
        return None;
    }
    let start = end.checked_sub_signed(Duration::days(i64::from(days)))?;
    Some((start, end))
}

/// Discharge readings of the first time series in a response.
///
/// Entries whose value is missing, unparsable or the no-data sentinel are
/// skipped.
pub fn extract_readings(body: &Value) -> Vec<StreamflowReading> {
    let Some(values) = body
        .pointer("/value/timeSeries/0/values/0/value")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    values
        .iter()
        .filter_map(|entry| {
            let discharge = match entry.get("value")? {
                Value::String(s) => s.trim().parse::<f64>().ok()?,
                Value::Number(n) => n.as_f64()?,
                _ => return None,
            };
            if discharge == NO_DATA || !discharge.is_finite() {
                return None;
            }

            Some(StreamflowReading {
                date_time: entry
                    .get("dateTime")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                discharge,
            })
        })
        .collect()
}

/// Site name reported in a response, if any
pub fn extract_site_name(body: &Value) -> Option<String> {
    body.pointer("/value/timeSeries/0/sourceInfo/siteName")
        .and_then(Value::as_str)
        .map(String::from)
}

/// Describe a discharge series with a trailing moving average of `window`
pub fn summarize(
    site: &str,
    site_name: Option<String>,
    readings: &[StreamflowReading],
    window: usize,
) -> StreamflowSummary {
    let values: Vec<f64> = readings.iter().map(|r| r.discharge).collect();
    let index: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();

    let outliers = detect_outliers(&values);
    let trend = match linear_regression(&index, &values) {
        Ok(fit) => Some(fit),
        Err(e) => {
            tracing::debug!(site = %site, error = %e, "No discharge trend");
            None
        }
    };

    StreamflowSummary {
        site: site.to_string(),
        site_name,
        readings: values.len(),
        stats: calculate_stats(&values),
        outlier_count: outliers.as_ref().map_or(0, |o| o.outliers.len()),
        lower_fence: outliers.as_ref().map(|o| o.lower_bound),
        upper_fence: outliers.as_ref().map(|o| o.upper_bound),
        trend,
        smoothed: moving_average(&values, window),
    }
}
