// File: crates/chart-core/src/line.rs
// Summary: Multi-series line controller: regional trends over years with a selection-driven y axis.

use crate::config::LineChartConfig;
use crate::controller::{legend_items, legend_muting, ChartController, ChartEvent, ChartState};
use crate::domain::{AxisDomain, AxisKind, DomainEngine, DomainPolicy};
use crate::error::{ChartError, Result};
use crate::grid::ticks;
use crate::instruction::{format_percentage, AxisId, DrawInstruction, ElementId, Marker, Tick, TooltipRow};
use crate::locate::locate;
use crate::records::RecordSet;
use crate::scale::LinearScale;
use crate::selection::SelectionSet;
use crate::series::{aggregate_line, AxisKey, LineChartSchema, LineDataset};

pub struct LineChartController {
    data: LineDataset,
    config: LineChartConfig,
    engine: DomainEngine,
    years: Vec<f64>,
    x_scale: LinearScale,
}

impl LineChartController {
    pub fn new(records: &RecordSet, schema: &LineChartSchema, config: LineChartConfig) -> Result<Self> {
        let data = aggregate_line(records, schema)?;
        Self::from_dataset(data, config)
    }

    /// Build from an already aggregated dataset; fails when there are no regions.
    pub fn from_dataset(data: LineDataset, config: LineChartConfig) -> Result<Self> {
        if data.regions.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        let years = data.years.iter().map(|y| *y as f64).collect::<Vec<_>>();
        let first = years.first().copied().unwrap_or(0.0);
        let last = years.last().copied().unwrap_or(first);
        let x_scale = LinearScale::new((first, last), config.x_range());
        Ok(Self { data, config, engine: DomainEngine::new(DomainPolicy::line_chart()), years, x_scale })
    }

    /// Replace the engine, e.g. to swap the rounding strategy.
    pub fn with_engine(mut self, engine: DomainEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn dataset(&self) -> &LineDataset { &self.data }

    pub fn x_scale(&self) -> &LinearScale { &self.x_scale }

    pub fn y_scale(&self, domain: &AxisDomain) -> LinearScale {
        let (d0, d1) = domain.bounds().unwrap_or((0.0, 1.0));
        LinearScale::new((d0, d1), self.config.y_range())
    }

    fn y_axis(&self, y_scale: &LinearScale) -> DrawInstruction {
        let (d0, d1) = y_scale.domain();
        DrawInstruction::SetAxis {
            axis: AxisId::Y,
            title: Some(self.config.axis_title.clone()),
            ticks: ticks(d0, d1, self.config.value_ticks)
                .into_iter()
                .map(|v| Tick { value: v, position: y_scale.to_px(v), label: format_percentage(v) })
                .collect(),
        }
    }

    /// Visibility, path and markers for every series under `domain`.
    fn series_geometry(&self, selection: &SelectionSet, domain: &AxisDomain) -> Vec<DrawInstruction> {
        let y_scale = self.y_scale(domain);
        let mut out = Vec::with_capacity(self.data.series.len() * 3);
        for (ci, s) in self.data.series.iter().enumerate() {
            let xy = s
                .points
                .iter()
                .filter_map(|p| Some((p.key.clone(), self.x_scale.to_px(p.key.as_year()? as f64), y_scale.to_px(p.value))))
                .collect::<Vec<_>>();
            out.push(DrawInstruction::SetVisibility {
                element: ElementId::Series { entity: s.entity.clone() },
                visible: selection.is_selected(&s.entity),
            });
            out.push(DrawInstruction::SetPath {
                entity: s.entity.clone(),
                color_key: ci,
                points: xy.iter().map(|(_, x, y)| (*x, *y)).collect(),
            });
            out.push(DrawInstruction::SetMarkers {
                entity: s.entity.clone(),
                radius: self.config.dot_radius,
                markers: xy
                    .into_iter()
                    .map(|(key, x, y)| Marker { key, x, y, color_key: ci, label: None })
                    .collect(),
            });
        }
        out
    }

    fn tooltip(&self, index: usize, pointer_y: f32, selection: &SelectionSet) -> DrawInstruction {
        let year = self.data.years[index];
        let key = AxisKey::Year(year);
        let rows = self
            .data
            .series
            .iter()
            .enumerate()
            .filter(|(_, s)| selection.is_selected(&s.entity))
            .filter_map(|(ci, s)| {
                let p = s.point(&key)?;
                Some(TooltipRow {
                    entity_name: s.entity.clone(),
                    color_key: ci,
                    value: p.value,
                    label: format_percentage(p.value),
                })
            })
            .collect();
        DrawInstruction::ShowTooltip {
            x: self.x_scale.to_px(year as f64) + self.config.dot_radius,
            y: pointer_y,
            title: year.to_string(),
            rows,
        }
    }
}

impl ChartController for LineChartController {
    fn id(&self) -> &'static str { "line" }

    fn initial_state(&self) -> ChartState {
        let selection = SelectionSet::all(self.data.regions.clone());
        let value_domain = self.engine.compute_domain(&self.data.series, &selection, AxisKind::Value);
        ChartState { selection, value_domain, hover: None }
    }

    fn initial_render(&self, state: &ChartState) -> Vec<DrawInstruction> {
        let mut out = vec![DrawInstruction::SetTitle { text: self.config.title.clone() }];
        let (first, last) = self.x_scale.domain();
        out.push(DrawInstruction::SetAxis {
            axis: AxisId::X,
            title: None,
            ticks: ticks(first, last, self.config.year_ticks)
                .into_iter()
                .map(|v| Tick { value: v, position: self.x_scale.to_px(v), label: format!("{}", v) })
                .collect(),
        });
        out.push(self.y_axis(&self.y_scale(&state.value_domain)));
        out.extend(self.series_geometry(&state.selection, &state.value_domain));
        out.push(DrawInstruction::SetLegend {
            title: self.config.legend_title.clone(),
            items: legend_items(&state.selection),
        });
        out
    }

    fn update(&self, state: &ChartState, event: &ChartEvent) -> Result<(ChartState, Vec<DrawInstruction>)> {
        let mut next = state.clone();
        let mut out = Vec::new();
        match event {
            ChartEvent::PointerMove { x, y, .. } => {
                if let Some(index) = locate(*x, &self.x_scale, &self.years) {
                    let year = self.data.years[index];
                    let (_, y2) = self.config.y_range();
                    out.push(self.tooltip(index, *y, &state.selection));
                    out.push(DrawInstruction::ShowFocusLine {
                        x: self.x_scale.to_px(year as f64),
                        y1: self.config.insets.top as f32,
                        y2,
                    });
                    out.push(DrawInstruction::HighlightMarkers { key: Some(AxisKey::Year(year)) });
                    next.hover = Some(index);
                }
            }
            ChartEvent::PointerLeave => {
                out.push(DrawInstruction::HideTooltip);
                out.push(DrawInstruction::HideFocusLine);
                out.push(DrawInstruction::HighlightMarkers { key: None });
                next.hover = None;
            }
            ChartEvent::LegendClick { category } => {
                next.selection = state.selection.toggle(category)?;
                next.value_domain = self.engine.on_selection_change(&state.value_domain, &self.data.series, &next.selection);
                out.push(self.y_axis(&self.y_scale(&next.value_domain)));
                out.extend(self.series_geometry(&next.selection, &next.value_domain));
                out.extend(legend_muting(&next.selection));
            }
        }
        Ok((next, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;

    fn fuel_poverty() -> RecordSet {
        let schema = LineChartSchema::default();
        let rows = [
            ("A", "2012", "10.2"),
            ("A", "2013", "14.5"),
            ("B", "2012", "8.0"),
            ("B", "2013", "20.0"),
        ];
        let records = rows
            .iter()
            .map(|(r, y, v)| {
                Record::from_pairs([
                    (schema.region_field.clone(), *r),
                    (schema.year_field.clone(), *y),
                    (schema.value_field.clone(), *v),
                    (schema.secondary_field.clone().unwrap_or_default(), "50"),
                ])
            })
            .collect();
        RecordSet::new(vec![], records)
    }

    fn controller() -> LineChartController {
        LineChartController::new(&fuel_poverty(), &LineChartSchema::default(), LineChartConfig::default()).unwrap()
    }

    #[test]
    fn legend_click_recomputes_y_domain() {
        let c = controller();
        let s0 = c.initial_state();
        assert_eq!(s0.value_domain, AxisDomain::Continuous { min: 8.0, max: 20.0 });

        let (s1, out) = c.update(&s0, &ChartEvent::LegendClick { category: "B".into() }).unwrap();
        assert_eq!(s1.value_domain, AxisDomain::Continuous { min: 10.0, max: 14.5 });
        assert!(matches!(out[0], DrawInstruction::SetAxis { axis: AxisId::Y, .. }));
        assert!(out.contains(&DrawInstruction::SetVisibility {
            element: ElementId::Series { entity: "B".into() },
            visible: false,
        }));
        assert!(out.contains(&DrawInstruction::SetLegendMuted { category: "B".into(), muted: true }));
        assert!(out.contains(&DrawInstruction::SetLegendMuted { category: "A".into(), muted: false }));
    }

    #[test]
    fn pointer_move_snaps_to_nearest_year() {
        let c = controller();
        let (first_px, last_px) = (c.x_scale().to_px(2012.0), c.x_scale().to_px(2013.0));
        let near_last = first_px + (last_px - first_px) * 0.8;
        let (s, out) = c
            .update(&c.initial_state(), &ChartEvent::PointerMove { x: near_last, y: 120.0, row: None })
            .unwrap();
        assert_eq!(s.hover, Some(1));
        match &out[0] {
            DrawInstruction::ShowTooltip { x, y, title, rows } => {
                assert_eq!(title, "2013");
                assert_eq!(*y, 120.0);
                assert_eq!(*x, last_px + 5.0);
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].entity_name, "A");
                assert_eq!(rows[1].label, "20%");
            }
            other => panic!("expected tooltip, got {other:?}"),
        }
        assert!(out.contains(&DrawInstruction::HighlightMarkers { key: Some(AxisKey::Year(2013)) }));
    }

    #[test]
    fn geometry_follows_recomputed_domain() {
        let c = controller();
        let (s1, out) = c
            .update(&c.initial_state(), &ChartEvent::LegendClick { category: "B".into() })
            .unwrap();
        let y_scale = c.y_scale(&s1.value_domain);
        let path_a = out.iter().find_map(|i| match i {
            DrawInstruction::SetPath { entity, points, .. } if entity == "A" => Some(points.clone()),
            _ => None,
        });
        let path_a = path_a.expect("path for A");
        assert_eq!(path_a.len(), 2);
        assert_eq!(path_a[1].1, y_scale.to_px(14.5));
        assert_eq!(path_a[1].1, 32.0);
    }

    #[test]
    fn unknown_legend_category_is_rejected() {
        let c = controller();
        assert!(c.update(&c.initial_state(), &ChartEvent::LegendClick { category: "Z".into() }).is_err());
    }
}
