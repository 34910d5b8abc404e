// File: crates/chart-core/src/config.rs
// Summary: Chart dimensions, margins and labels; defaults match the published charts.

use serde::{Deserialize, Serialize};

/// Default surface width in pixels when the host does not supply one.
pub const WIDTH: f32 = 800.0;

/// Plot-area margins in pixels, measured inward from the surface edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(40, 24, 32, 24)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotChartConfig {
    pub width: f32,
    pub height: f32,
    pub insets: Insets,
    pub dot_radius: f32,
    pub value_ticks: usize,
    pub axis_title: String,
    pub legend_title: String,
}

impl DotChartConfig {
    /// Row track is a round-capped stroke just wider than a dot.
    pub fn track_stroke_width(&self) -> f32 { (self.dot_radius + 1.0) * 2.0 }

    pub fn x_range(&self) -> (f32, f32) { (self.insets.left as f32, self.width - self.insets.right as f32) }

    pub fn y_range(&self) -> (f32, f32) { (self.insets.top as f32, self.height - self.insets.bottom as f32) }
}

impl Default for DotChartConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: 320.0,
            insets: Insets::new(128, 24, 48, 24),
            dot_radius: 12.0,
            value_ticks: 5,
            axis_title: "Age Group".into(),
            legend_title: "Answers (Click to toggle)".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartConfig {
    pub width: f32,
    pub height: f32,
    pub insets: Insets,
    pub dot_radius: f32,
    pub value_ticks: usize,
    pub year_ticks: usize,
    pub title: String,
    pub axis_title: String,
    pub legend_title: String,
}

impl LineChartConfig {
    pub fn x_range(&self) -> (f32, f32) { (self.insets.left as f32, self.width - self.insets.right as f32) }

    /// Bottom-to-top so larger values sit higher.
    pub fn y_range(&self) -> (f32, f32) { (self.height - self.insets.bottom as f32, self.insets.top as f32) }
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: 400.0,
            insets: Insets::default(),
            dot_radius: 5.0,
            value_ticks: 5,
            year_ticks: 10,
            title: "Fuel poor households regional trends".into(),
            axis_title: "Proportion of households fuel poor".into(),
            legend_title: "Regions (Click to toggle)".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: LineChartConfig = serde_json::from_str(r#"{ "width": 640, "value_ticks": 4 }"#).unwrap();
        assert_eq!(cfg.width, 640.0);
        assert_eq!(cfg.value_ticks, 4);
        assert_eq!(cfg.height, 400.0);
        assert_eq!(cfg.y_range(), (376.0, 32.0));
    }

    #[test]
    fn dot_track_is_wider_than_dot() {
        let cfg = DotChartConfig::default();
        assert_eq!(cfg.track_stroke_width(), 26.0);
        assert_eq!(cfg.x_range(), (128.0, 776.0));
    }
}
