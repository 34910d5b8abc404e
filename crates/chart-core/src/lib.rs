// File: crates/chart-core/src/lib.rs
// Summary: Interactive chart data controller; turns tabular rows plus user events into draw instructions.

pub mod error;
pub mod records;
pub mod series;
pub mod grid;
pub mod scale;
pub mod domain;
pub mod selection;
pub mod locate;
pub mod instruction;
pub mod config;
pub mod controller;
pub mod dot;
pub mod line;

pub use error::{ChartError, Result};
pub use records::{FieldValue, Record, RecordSet};
pub use series::{aggregate, aggregate_dot, aggregate_line, AxisKey, ChartSchema, DotChartSchema, DotDataset, LineChartSchema, LineDataset, Series, SeriesPoint};
pub use scale::{LinearScale, PointScale};
pub use domain::{AxisDomain, AxisKind, DomainEngine, DomainPolicy, DomainRounding, IdentityRounding, Membership, NiceRounding, Recompute};
pub use selection::{SelectionSet, SelectionState};
pub use locate::{bisect_center, locate};
pub use instruction::{AxisId, DrawInstruction, ElementId, LegendItem, Marker, Tick, TooltipRow};
pub use config::{DotChartConfig, Insets, LineChartConfig};
pub use controller::{ChartController, ChartEvent, ChartState, InteractiveChart};
pub use dot::DotChartController;
pub use line::LineChartController;
