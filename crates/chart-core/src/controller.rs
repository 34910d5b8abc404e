// File: crates/chart-core/src/controller.rs
// Summary: Controller trait, events and session state shared by the dot and line charts.
// Notes:
// - Controllers are pure: (state, event) -> (new state, instructions). They hold
//   the loaded dataset and scales but never mutate them after construction.
// - `InteractiveChart` is the host-facing session wrapper; it keeps the latest
//   state and applies events in arrival order.

use log::debug;

use crate::domain::AxisDomain;
use crate::error::Result;
use crate::instruction::{DrawInstruction, LegendItem};
use crate::selection::SelectionSet;

/// Host input, already translated into chart coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartEvent {
    /// Pointer position relative to the chart surface. `row` is the dot-chart
    /// row the renderer hit-tested under the pointer; the line chart ignores it.
    PointerMove { x: f32, y: f32, row: Option<usize> },
    PointerLeave,
    LegendClick { category: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartState {
    pub selection: SelectionSet,
    /// Current continuous value-axis domain.
    pub value_domain: AxisDomain,
    /// Hovered row (dot chart) or located year index (line chart).
    pub hover: Option<usize>,
}

pub trait ChartController {
    fn id(&self) -> &'static str;

    /// Selection with everything on and the load-time value domain.
    fn initial_state(&self) -> ChartState;

    /// Full instruction set for a fresh surface in `state`.
    fn initial_render(&self, state: &ChartState) -> Vec<DrawInstruction>;

    fn update(&self, state: &ChartState, event: &ChartEvent) -> Result<(ChartState, Vec<DrawInstruction>)>;
}

/// Legend entries in category order; `color_key` is the category ordinal.
pub(crate) fn legend_items(selection: &SelectionSet) -> Vec<LegendItem> {
    selection
        .universe()
        .iter()
        .enumerate()
        .map(|(i, c)| LegendItem { category: c.clone(), color_key: i, muted: selection.is_muted(c) })
        .collect()
}

pub(crate) fn legend_muting(selection: &SelectionSet) -> impl Iterator<Item = DrawInstruction> + '_ {
    selection
        .universe()
        .iter()
        .map(|c| DrawInstruction::SetLegendMuted { category: c.clone(), muted: selection.is_muted(c) })
}

/// Session wrapper holding the latest state. Later events supersede earlier ones.
pub struct InteractiveChart<C: ChartController> {
    controller: C,
    state: ChartState,
}

impl<C: ChartController> InteractiveChart<C> {
    pub fn new(controller: C) -> Self {
        let state = controller.initial_state();
        Self { controller, state }
    }

    pub fn initial_render(&self) -> Vec<DrawInstruction> { self.controller.initial_render(&self.state) }

    /// Apply one event. On error the previous state is kept.
    pub fn handle(&mut self, event: &ChartEvent) -> Result<Vec<DrawInstruction>> {
        let (next, instructions) = self.controller.update(&self.state, event)?;
        debug!("{}: {:?} -> {} instructions", self.controller.id(), event, instructions.len());
        self.state = next;
        Ok(instructions)
    }

    pub fn state(&self) -> &ChartState { &self.state }

    pub fn controller(&self) -> &C { &self.controller }
}
