// Chart specification derived from a projected view
use super::projection::{ProjectedView, ProjectionMode};
use serde::Serialize;

/// Number of most recent points visible before the user zooms out.
pub const DAYS_TO_SHOW: usize = 14;

const STACK_ID: &str = "one";
const AXIS_LABEL_COLOR: &str = "gray";
const DATE_LABEL_ROTATION: u16 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    BarStacked,
    LineUnstacked,
}

impl From<ProjectionMode> for ChartKind {
    fn from(mode: ProjectionMode) -> Self {
        match mode {
            ProjectionMode::Daily => ChartKind::BarStacked,
            ProjectionMode::Cumulative => ChartKind::LineUnstacked,
        }
    }
}

impl ChartKind {
    fn series_type(&self) -> SeriesType {
        match self {
            ChartKind::BarStacked => SeriesType::Bar,
            ChartKind::LineUnstacked => SeriesType::Line,
        }
    }

    fn stack(&self) -> Option<String> {
        match self {
            ChartKind::BarStacked => Some(STACK_ID.to_string()),
            ChartKind::LineUnstacked => None,
        }
    }
}

/// Display name and color token for one series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesLabel {
    pub name: String,
    pub color: String,
}

impl SeriesLabel {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Category,
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabel {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
    pub axis_label: AxisLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub data: Vec<String>,
    pub bottom: u32,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisPointer {
    pub axis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub trigger: String,
    pub axis_pointer: AxisPointer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub left: String,
    pub right: String,
    pub bottom: u32,
    pub top: u32,
    pub contain_label: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aria {
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoomWindow {
    #[serde(rename = "type")]
    pub zoom_type: String,
    pub start: f64,
    pub end: f64,
    pub bottom: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub name: String,
    pub color: String,
    #[serde(rename = "type")]
    pub series_type: SeriesType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    pub data: Vec<i64>,
}

/// Declarative chart description, laid out the way ECharts reads its options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub aria: Aria,
    pub grid: Grid,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub tooltip: Tooltip,
    pub legend: Legend,
    pub data_zoom: Vec<ZoomWindow>,
    pub series: Vec<SeriesSpec>,
}

/// Start of the default zoom window, in percent of the category axis, so that
/// at most the last `DAYS_TO_SHOW` points are visible.
pub fn zoom_start_percentage(date_count: usize) -> f64 {
    if date_count <= DAYS_TO_SHOW {
        return 0.0;
    }
    ((date_count - DAYS_TO_SHOW) * 100) as f64 / date_count as f64
}

/// Build the chart for `view`. Series `i` is named by `labels[i]` and bound
/// to `view.metrics[i]`; a metric the view lacks renders as an empty series.
pub fn build(view: &ProjectedView, kind: ChartKind, labels: &[SeriesLabel]) -> ChartSpec {
    let series = labels
        .iter()
        .enumerate()
        .map(|(index, label)| SeriesSpec {
            name: label.name.clone(),
            color: label.color.clone(),
            series_type: kind.series_type(),
            stack: kind.stack(),
            data: view.metrics.get(index).cloned().unwrap_or_default(),
        })
        .collect();

    ChartSpec {
        aria: Aria { show: true },
        grid: Grid {
            left: "1%".to_string(),
            right: "1%".to_string(),
            bottom: 80,
            top: 20,
            contain_label: true,
        },
        x_axis: Axis {
            axis_type: AxisType::Category,
            data: Some(view.dates.clone()),
            axis_label: AxisLabel {
                color: AXIS_LABEL_COLOR.to_string(),
                font_weight: Some("bold".to_string()),
                rotate: Some(DATE_LABEL_ROTATION),
            },
        },
        y_axis: Axis {
            axis_type: AxisType::Value,
            data: None,
            axis_label: AxisLabel {
                color: AXIS_LABEL_COLOR.to_string(),
                font_weight: None,
                rotate: None,
            },
        },
        tooltip: Tooltip {
            trigger: "axis".to_string(),
            axis_pointer: AxisPointer {
                axis: "x".to_string(),
            },
        },
        legend: Legend {
            data: labels.iter().map(|l| l.name.clone()).collect(),
            bottom: 0,
            icon: "circle".to_string(),
        },
        data_zoom: vec![ZoomWindow {
            zoom_type: "slider".to_string(),
            start: zoom_start_percentage(view.dates.len()),
            end: 100.0,
            bottom: 50,
        }],
        series,
    }
}
