//! Chart Builder
//!
//! Maps small option records into [`ChartConfig`] values. Dataset colours
//! default to the palette entry at the dataset's position.

use serde::Deserialize;

use super::config::*;
use crate::config::Palette;

/// Alpha suffix appended to a line colour for its fill
const FILL_ALPHA: &str = "20";

/// One series of a line chart
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineSeries {
    pub label: String,
    pub data: Vec<f64>,
    pub color: Option<String>,
    pub fill: Option<bool>,
    pub tension: Option<f64>,
    pub point_radius: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineChartOptions {
    pub labels: Vec<String>,
    pub datasets: Vec<LineSeries>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

/// One series of a bar chart
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarSeries {
    pub label: String,
    pub data: Vec<f64>,
    /// One colour per bar; palette colour when absent
    pub colors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarChartOptions {
    pub labels: Vec<String>,
    pub datasets: Vec<BarSeries>,
    pub title: Option<String>,
    pub horizontal: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PieChartOptions {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub title: Option<String>,
    pub doughnut: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScatterSeries {
    pub label: String,
    pub data: Vec<(f64, f64)>,
    pub color: Option<String>,
    pub point_radius: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScatterOptions {
    pub datasets: Vec<ScatterSeries>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

/// Builds chart configurations against a fixed palette
#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    palette: Palette,
}

impl ChartBuilder {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Line chart with a translucent fill colour per series
    pub fn line_chart(&self, options: LineChartOptions) -> ChartConfig {
        let datasets = options
            .datasets
            .into_iter()
            .enumerate()
            .map(|(index, series)| {
                let color = series
                    .color
                    .unwrap_or_else(|| self.palette.color(index).to_string());

                Dataset {
                    label: Some(series.label),
                    data: DatasetValues::Values(series.data),
                    background_color: Some(Colors::Single(format!("{}{}", color, FILL_ALPHA))),
                    border_color: Some(color),
                    fill: Some(series.fill.unwrap_or(false)),
                    tension: Some(series.tension.unwrap_or(0.4)),
                    point_radius: Some(series.point_radius.unwrap_or(3.0)),
                    ..Default::default()
                }
            })
            .collect();

        ChartConfig {
            chart_type: ChartType::Line,
            data: ChartData {
                labels: Some(options.labels),
                datasets,
            },
            options: ChartOptions {
                index_axis: None,
                responsive: true,
                maintain_aspect_ratio: false,
                plugins: Plugins {
                    title: Title::from_text(options.title),
                    legend: Some(Legend {
                        display: None,
                        position: Some("top".to_string()),
                    }),
                },
                scales: Some(Scales::titled(options.x_label, options.y_label)),
            },
        }
    }

    /// Bar chart, vertical unless `horizontal` is set
    pub fn bar_chart(&self, options: BarChartOptions) -> ChartConfig {
        let show_legend = options.datasets.len() > 1;

        let datasets = options
            .datasets
            .into_iter()
            .enumerate()
            .map(|(index, series)| Dataset {
                label: Some(series.label),
                data: DatasetValues::Values(series.data),
                background_color: Some(match series.colors {
                    Some(colors) => Colors::PerElement(colors),
                    None => Colors::Single(self.palette.color(index).to_string()),
                }),
                border_radius: Some(4.0),
                ..Default::default()
            })
            .collect();

        ChartConfig {
            chart_type: ChartType::Bar,
            data: ChartData {
                labels: Some(options.labels),
                datasets,
            },
            options: ChartOptions {
                index_axis: Some(if options.horizontal { "y" } else { "x" }.to_string()),
                responsive: true,
                maintain_aspect_ratio: false,
                plugins: Plugins {
                    title: Title::from_text(options.title),
                    legend: Some(Legend {
                        display: Some(show_legend),
                        position: None,
                    }),
                },
                scales: None,
            },
        }
    }

    /// Pie (or doughnut) chart coloured with the whole palette
    pub fn pie_chart(&self, options: PieChartOptions) -> ChartConfig {
        let dataset = Dataset {
            data: DatasetValues::Values(options.data),
            background_color: Some(Colors::PerElement(self.palette.colors.clone())),
            ..Default::default()
        };

        ChartConfig {
            chart_type: if options.doughnut {
                ChartType::Doughnut
            } else {
                ChartType::Pie
            },
            data: ChartData {
                labels: Some(options.labels),
                datasets: vec![dataset],
            },
            options: ChartOptions {
                index_axis: None,
                responsive: true,
                maintain_aspect_ratio: false,
                plugins: Plugins {
                    title: Title::from_text(options.title),
                    legend: Some(Legend {
                        display: None,
                        position: Some("right".to_string()),
                    }),
                },
                scales: None,
            },
        }
    }

    /// Scatter plot of x/y pairs
    pub fn scatter_plot(&self, options: ScatterOptions) -> ChartConfig {
        let datasets = options
            .datasets
            .into_iter()
            .enumerate()
            .map(|(index, series)| Dataset {
                label: Some(series.label),
                data: DatasetValues::Points(
                    series.data.into_iter().map(|(x, y)| Point { x, y }).collect(),
                ),
                background_color: Some(Colors::Single(
                    series
                        .color
                        .unwrap_or_else(|| self.palette.color(index).to_string()),
                )),
                point_radius: Some(series.point_radius.unwrap_or(5.0)),
                ..Default::default()
            })
            .collect();

        ChartConfig {
            chart_type: ChartType::Scatter,
            data: ChartData {
                labels: None,
                datasets,
            },
            options: ChartOptions {
                index_axis: None,
                responsive: true,
                maintain_aspect_ratio: false,
                plugins: Plugins {
                    title: Title::from_text(options.title),
                    legend: None,
                },
                scales: Some(Scales::titled(options.x_label, options.y_label)),
            },
        }
    }
}
