// File: crates/chart-core/src/instruction.rs
// Summary: Declarative, backend-agnostic draw/update instructions emitted by the controllers.

use serde::Serialize;

use crate::series::AxisKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisId {
    X,
    Y,
}

/// Addressable chart element for visibility updates.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementId {
    /// One dot: `entity` is the row (age group), `key` the answer.
    Point { entity: String, key: AxisKey },
    /// A whole series group: path plus its markers.
    Series { entity: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    pub position: f32,
    pub label: String,
}

/// `color_key` is the ordinal of the category in legend order; the renderer
/// owns the palette.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendItem {
    pub category: String,
    pub color_key: usize,
    pub muted: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub key: AxisKey,
    pub x: f32,
    pub y: f32,
    pub color_key: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TooltipRow {
    pub entity_name: String,
    pub color_key: usize,
    pub value: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawInstruction {
    SetTitle { text: String },
    SetAxis {
        axis: AxisId,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        ticks: Vec<Tick>,
    },
    SetLegend { title: String, items: Vec<LegendItem> },
    SetLegendMuted { category: String, muted: bool },
    /// Horizontal background track behind one dot-chart row.
    SetRowTrack { entity: String, y: f32, x1: f32, x2: f32, stroke_width: f32 },
    SetPath { entity: String, color_key: usize, points: Vec<(f32, f32)> },
    SetMarkers { entity: String, radius: f32, markers: Vec<Marker> },
    SetVisibility { element: ElementId, visible: bool },
    ShowTooltip { x: f32, y: f32, title: String, rows: Vec<TooltipRow> },
    HideTooltip,
    ShowFocusLine { x: f32, y1: f32, y2: f32 },
    HideFocusLine,
    /// Outline markers at `key` on every series; `None` clears.
    HighlightMarkers { key: Option<AxisKey> },
    /// Outline every dot in one row; `None` clears.
    HighlightRow { entity: Option<String> },
}

/// Percent label as shown on value axes and tooltips ("12.3%", "11%").
pub fn format_percentage(v: f64) -> String {
    format!("{}%", v)
}
