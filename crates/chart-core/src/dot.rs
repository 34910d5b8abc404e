// File: crates/chart-core/src/dot.rs
// Summary: Dot-plot controller: answers per age group on a fixed percentage axis.
// Notes:
// - The x (value) domain is computed once at load over every answer and is not
//   recomputed when answers are toggled; toggling only changes dot visibility.

use crate::config::DotChartConfig;
use crate::controller::{legend_items, legend_muting, ChartController, ChartEvent, ChartState};
use crate::domain::{AxisDomain, AxisKind, DomainEngine, DomainPolicy};
use crate::error::{ChartError, Result};
use crate::grid::ticks;
use crate::instruction::{format_percentage, AxisId, DrawInstruction, ElementId, Marker, Tick, TooltipRow};
use crate::records::RecordSet;
use crate::scale::{LinearScale, PointScale};
use crate::selection::SelectionSet;
use crate::series::{aggregate_dot, DotChartSchema, DotDataset, Series};

pub struct DotChartController {
    data: DotDataset,
    config: DotChartConfig,
    engine: DomainEngine,
    x_domain: AxisDomain,
    x_scale: LinearScale,
    y_scale: PointScale,
}

impl DotChartController {
    pub fn new(records: &RecordSet, schema: &DotChartSchema, config: DotChartConfig) -> Result<Self> {
        let data = aggregate_dot(records, schema)?;
        Self::from_dataset(data, config)
    }

    /// Build from an already aggregated dataset. A dataset without answers has
    /// nothing to select and is rejected.
    pub fn from_dataset(data: DotDataset, config: DotChartConfig) -> Result<Self> {
        if data.answers.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        let engine = DomainEngine::new(DomainPolicy::dot_chart());
        let everything = SelectionSet::all(data.answers.clone());
        let x_domain = engine.compute_domain(&data.series, &everything, AxisKind::Value);
        let (d0, d1) = x_domain.bounds().unwrap_or((0.0, 1.0));
        let x_scale = LinearScale::new((d0, d1), config.x_range());
        let groups = data.series.iter().map(|s| s.entity.clone()).collect();
        let y_scale = PointScale::new(groups, config.y_range());
        Ok(Self { data, config, engine, x_domain, x_scale, y_scale })
    }

    pub fn dataset(&self) -> &DotDataset { &self.data }

    pub fn x_domain(&self) -> &AxisDomain { &self.x_domain }

    fn row_y(&self, row: usize) -> f32 { self.y_scale.position_at(row).unwrap_or(self.config.insets.top as f32) }

    fn answer_index(&self, answer: &str) -> usize {
        self.data.answers.iter().position(|a| a == answer).unwrap_or(0)
    }

    fn dot_visibility<'a>(&'a self, selection: &'a SelectionSet) -> impl Iterator<Item = DrawInstruction> + 'a {
        self.data.series.iter().flat_map(move |s| {
            s.points.iter().map(move |p| DrawInstruction::SetVisibility {
                element: ElementId::Point { entity: s.entity.clone(), key: p.key.clone() },
                visible: p.key.as_category().map(|c| selection.is_selected(c)).unwrap_or(false),
            })
        })
    }

    fn tooltip(&self, row: usize, pointer_x: f32, selection: &SelectionSet) -> DrawInstruction {
        let s: &Series = &self.data.series[row];
        let rows = s
            .points
            .iter()
            .filter_map(|p| {
                let answer = p.key.as_category()?;
                if !selection.is_selected(answer) {
                    return None;
                }
                Some(TooltipRow {
                    entity_name: answer.to_string(),
                    color_key: self.answer_index(answer),
                    value: p.value,
                    label: format_percentage(p.value),
                })
            })
            .collect();
        DrawInstruction::ShowTooltip {
            x: pointer_x,
            y: self.row_y(row) + self.config.track_stroke_width() / 2.0,
            title: format!("Age Group: {}", s.entity),
            rows,
        }
    }
}

impl ChartController for DotChartController {
    fn id(&self) -> &'static str { "dot" }

    fn initial_state(&self) -> ChartState {
        ChartState {
            selection: SelectionSet::all(self.data.answers.clone()),
            value_domain: self.x_domain.clone(),
            hover: None,
        }
    }

    fn initial_render(&self, state: &ChartState) -> Vec<DrawInstruction> {
        let mut out = vec![DrawInstruction::SetTitle { text: self.data.question.clone() }];

        let (d0, d1) = self.x_scale.domain();
        out.push(DrawInstruction::SetAxis {
            axis: AxisId::X,
            title: None,
            ticks: ticks(d0, d1, self.config.value_ticks)
                .into_iter()
                .map(|v| Tick { value: v, position: self.x_scale.to_px(v), label: format_percentage(v) })
                .collect(),
        });
        out.push(DrawInstruction::SetAxis {
            axis: AxisId::Y,
            title: Some(self.config.axis_title.clone()),
            ticks: self
                .y_scale
                .categories()
                .iter()
                .enumerate()
                .map(|(i, g)| Tick { value: i as f64, position: self.row_y(i), label: g.clone() })
                .collect(),
        });

        let (x1, x2) = self.config.x_range();
        for (row, s) in self.data.series.iter().enumerate() {
            let y = self.row_y(row);
            out.push(DrawInstruction::SetRowTrack {
                entity: s.entity.clone(),
                y,
                x1,
                x2,
                stroke_width: self.config.track_stroke_width(),
            });
            out.push(DrawInstruction::SetMarkers {
                entity: s.entity.clone(),
                radius: self.config.dot_radius,
                markers: s
                    .points
                    .iter()
                    .map(|p| Marker {
                        key: p.key.clone(),
                        x: self.x_scale.to_px(p.value),
                        y,
                        color_key: p.key.as_category().map(|a| self.answer_index(a)).unwrap_or(0),
                        label: Some(format!("{}", p.value)),
                    })
                    .collect(),
            });
        }

        out.push(DrawInstruction::SetLegend {
            title: self.config.legend_title.clone(),
            items: legend_items(&state.selection),
        });
        out.extend(self.dot_visibility(&state.selection));
        out
    }

    fn update(&self, state: &ChartState, event: &ChartEvent) -> Result<(ChartState, Vec<DrawInstruction>)> {
        let mut next = state.clone();
        let mut out = Vec::new();
        match event {
            ChartEvent::PointerMove { x, row, .. } => match row {
                Some(row) if !self.data.series.is_empty() => {
                    let row = (*row).min(self.data.series.len() - 1);
                    if state.hover != Some(row) {
                        out.push(DrawInstruction::HighlightRow { entity: Some(self.data.series[row].entity.clone()) });
                    }
                    out.push(self.tooltip(row, *x, &state.selection));
                    next.hover = Some(row);
                }
                _ => {
                    if state.hover.is_some() {
                        out.push(DrawInstruction::HideTooltip);
                        out.push(DrawInstruction::HighlightRow { entity: None });
                    }
                    next.hover = None;
                }
            },
            ChartEvent::PointerLeave => {
                out.push(DrawInstruction::HideTooltip);
                out.push(DrawInstruction::HighlightRow { entity: None });
                next.hover = None;
            }
            ChartEvent::LegendClick { category } => {
                next.selection = state.selection.toggle(category)?;
                next.value_domain = self.engine.on_selection_change(&state.value_domain, &self.data.series, &next.selection);
                out.extend(self.dot_visibility(&next.selection));
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

    fn survey() -> RecordSet {
        let q = "How is your financial situation?";
        let rows = [("Better", "10", "20"), ("Same", "45", "30"), ("Worse", "47", "50")];
        let records = rows
            .iter()
            .map(|(a, y, o)| Record::from_pairs([(q, *a), ("young", *y), ("old", *o)]))
            .collect();
        RecordSet::new(vec![q.into(), "young".into(), "old".into()], records)
    }

    fn controller() -> DotChartController {
        let schema = DotChartSchema { answer_field: None, age_groups: vec!["young".into(), "old".into()] };
        DotChartController::new(&survey(), &schema, DotChartConfig::default()).unwrap()
    }

    #[test]
    fn x_domain_starts_at_zero_and_is_niced() {
        let c = controller();
        assert_eq!(c.x_domain(), &AxisDomain::Continuous { min: 0.0, max: 50.0 });
        assert_eq!(c.dataset().question, "How is your financial situation?");
    }

    #[test]
    fn legend_click_only_changes_visibility() {
        let c = controller();
        let s0 = c.initial_state();
        let (s1, out) = c.update(&s0, &ChartEvent::LegendClick { category: "Worse".into() }).unwrap();
        assert_eq!(s1.value_domain, s0.value_domain);
        assert!(out.iter().all(|i| matches!(
            i,
            DrawInstruction::SetVisibility { .. } | DrawInstruction::SetLegendMuted { .. }
        )));
        let hidden = out
            .iter()
            .filter(|i| matches!(i, DrawInstruction::SetVisibility { visible: false, .. }))
            .count();
        assert_eq!(hidden, 2);
    }

    #[test]
    fn tooltip_lists_selected_answers_in_answer_order() {
        let c = controller();
        let s0 = c.initial_state();
        let (s1, _) = c.update(&s0, &ChartEvent::LegendClick { category: "Same".into() }).unwrap();
        let (s2, out) = c.update(&s1, &ChartEvent::PointerMove { x: 300.0, y: 10.0, row: Some(1) }).unwrap();
        assert_eq!(s2.hover, Some(1));
        let tooltip = out.iter().find_map(|i| match i {
            DrawInstruction::ShowTooltip { title, rows, x, .. } => Some((title.clone(), rows.clone(), *x)),
            _ => None,
        });
        let (title, rows, x) = tooltip.expect("tooltip shown");
        assert_eq!(title, "Age Group: old");
        assert_eq!(x, 300.0);
        let names = rows.iter().map(|r| r.entity_name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Better", "Worse"]);
        assert_eq!(rows[1].color_key, 2);
        assert_eq!(rows[1].label, "50%");
    }

    #[test]
    fn out_of_range_row_clamps_to_last() {
        let c = controller();
        let (s, _) = c.update(&c.initial_state(), &ChartEvent::PointerMove { x: 0.0, y: 0.0, row: Some(9) }).unwrap();
        assert_eq!(s.hover, Some(1));
    }

    #[test]
    fn pointer_leave_hides_tooltip() {
        let c = controller();
        let (s, out) = c.update(&c.initial_state(), &ChartEvent::PointerLeave).unwrap();
        assert_eq!(s.hover, None);
        assert!(out.contains(&DrawInstruction::HideTooltip));
    }
}
