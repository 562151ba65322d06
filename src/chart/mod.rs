//! Chart Configurations
//!
//! Declarative chart configurations for the dashboard, serialized in the
//! shape Chart.js expects. Nothing here draws; the browser side does.

mod builder;
mod config;

pub use builder::{
    BarChartOptions, BarSeries, ChartBuilder, LineChartOptions, LineSeries, PieChartOptions,
    ScatterOptions, ScatterSeries,
};
pub use config::{
    Axis, ChartConfig, ChartData, ChartOptions, ChartType, Colors, Dataset, DatasetValues, Legend,
    Plugins, Point, Scales, Title,
};
