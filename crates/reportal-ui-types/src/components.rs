//! Typed report components and the validation boundary.
//!
//! The backend emits untyped [`ComponentConfig`] descriptors. Before anything
//! reaches a widget, each descriptor is resolved into the [`ReportComponent`]
//! discriminated union here; unknown types and malformed property sets are
//! rejected with a typed [`ComponentError`] instead of being forwarded blind.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::ComponentConfig;

/// Fallback palette cycled by index when a chart supplies fewer explicit
/// colors than it has slices.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff7c7c", "#8dd1e1", "#d084d0", "#ffb347", "#67b7dc",
];

fn default_table_title() -> String {
    "データテーブル".to_string()
}

fn default_summary_title() -> String {
    "サマリー".to_string()
}

fn default_line_title() -> String {
    "推移グラフ".to_string()
}

fn default_bar_title() -> String {
    "棒グラフ".to_string()
}

fn default_pie_title() -> String {
    "円グラフ".to_string()
}

fn default_line_x_axis() -> String {
    "date".to_string()
}

fn default_bar_x_axis() -> String {
    "name".to_string()
}

fn default_pie_data_key() -> String {
    "value".to_string()
}

fn default_pie_name_key() -> String {
    "name".to_string()
}

/// Direction of a metric's movement since the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

/// Styling descriptor for one plotted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    /// Key to read from each data row.
    #[serde(rename = "dataKey")]
    pub data_key: String,
    /// Display name. Falls back to the data key when empty.
    #[serde(default)]
    pub name: String,
    /// Hex color, e.g. "#82ca9d". Falls back to the default palette.
    #[serde(default)]
    pub color: Option<String>,
}

/// Properties of a data table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableProps {
    /// Row objects. An empty or missing list renders the empty state.
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    /// Column names. Falls back to the first row's keys when empty.
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default = "default_table_title")]
    pub title: String,
}

/// Properties of a single-value metric card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricProps {
    pub title: String,
    /// The headline value; the backend sends either a string or a number.
    pub value: Value,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub trend: Option<TrendDirection>,
    #[serde(rename = "trendValue", default)]
    pub trend_value: Option<String>,
}

/// Properties of a free-text summary card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryProps {
    pub text: String,
    #[serde(default = "default_summary_title")]
    pub title: String,
    /// Optional flat key/value metrics rendered as a grid under the text.
    #[serde(default)]
    pub metrics: Option<Map<String, Value>>,
}

/// Properties of a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartProps {
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    #[serde(default)]
    pub lines: Vec<SeriesSpec>,
    #[serde(default = "default_line_title")]
    pub title: String,
    #[serde(rename = "xAxis", default = "default_line_x_axis")]
    pub x_axis: String,
}

/// Properties of a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartProps {
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    #[serde(default)]
    pub bars: Vec<SeriesSpec>,
    #[serde(default = "default_bar_title")]
    pub title: String,
    #[serde(rename = "xAxis", default = "default_bar_x_axis")]
    pub x_axis: String,
}

/// Properties of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChartProps {
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    #[serde(default = "default_pie_title")]
    pub title: String,
    /// Explicit slice colors. When empty, [`DEFAULT_PALETTE`] is used.
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(rename = "dataKey", default = "default_pie_data_key")]
    pub data_key: String,
    #[serde(rename = "nameKey", default = "default_pie_name_key")]
    pub name_key: String,
}

/// A validated, typed report component. Serializes to the same shape the
/// backend emits (`{"type": ..., "props": {...}}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props")]
pub enum ReportComponent {
    LineChart(LineChartProps),
    BarChart(BarChartProps),
    PieChart(PieChartProps),
    Summary(SummaryProps),
    Metric(MetricProps),
    Table(TableProps),
}

/// Why a descriptor failed validation.
#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("unknown component type '{0}'")]
    UnknownType(String),
    #[error("invalid props for {component_type}: {source}")]
    InvalidProps {
        component_type: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ReportComponent {
    /// Validate one raw descriptor into its typed form.
    pub fn from_config(config: &ComponentConfig) -> Result<ReportComponent, ComponentError> {
        let props = config.props.clone();
        let invalid = |source| ComponentError::InvalidProps {
            component_type: config.component_type.clone(),
            source,
        };

        match config.component_type.as_str() {
            "LineChart" => serde_json::from_value(props)
                .map(ReportComponent::LineChart)
                .map_err(invalid),
            "BarChart" => serde_json::from_value(props)
                .map(ReportComponent::BarChart)
                .map_err(invalid),
            "PieChart" => serde_json::from_value(props)
                .map(ReportComponent::PieChart)
                .map_err(invalid),
            "Summary" => serde_json::from_value(props)
                .map(ReportComponent::Summary)
                .map_err(invalid),
            "Metric" => serde_json::from_value(props)
                .map(ReportComponent::Metric)
                .map_err(invalid),
            "Table" => serde_json::from_value(props)
                .map(ReportComponent::Table)
                .map_err(invalid),
            other => Err(ComponentError::UnknownType(other.to_string())),
        }
    }

    /// The wire type tag of this component.
    pub fn type_name(&self) -> &'static str {
        match self {
            ReportComponent::LineChart(_) => "LineChart",
            ReportComponent::BarChart(_) => "BarChart",
            ReportComponent::PieChart(_) => "PieChart",
            ReportComponent::Summary(_) => "Summary",
            ReportComponent::Metric(_) => "Metric",
            ReportComponent::Table(_) => "Table",
        }
    }
}

/// Validate a descriptor list in order, dropping entries that fail.
///
/// Survivors keep their relative order. Each dropped descriptor emits one
/// diagnostic; nothing is rendered for it.
pub fn resolve_components(configs: &[ComponentConfig]) -> Vec<ReportComponent> {
    return configs
        .iter()
        .filter_map(|config| match ReportComponent::from_config(config) {
            Ok(component) => Some(component),
            Err(err) => {
                tracing::warn!(
                    component_type = %config.component_type,
                    error = %err,
                    "dropping component descriptor"
                );
                None
            }
        })
        .collect();
}
