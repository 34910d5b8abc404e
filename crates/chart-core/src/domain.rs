// File: crates/chart-core/src/domain.rs
// Summary: Axis domain computation over the selected subset of series, with pluggable rounding.
// Notes:
// - Per-chart policies differ on purpose: the dot chart's value axis is fixed at
//   load and spans [0, max]; the line chart's value axis follows the selection.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::grid::nice;
use crate::selection::SelectionSet;
use crate::series::Series;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AxisDomain {
    Continuous { min: f64, max: f64 },
    Categorical { categories: Vec<String> },
}

impl AxisDomain {
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            AxisDomain::Continuous { min, max } => Some((*min, *max)),
            AxisDomain::Categorical { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisKind {
    Value,
    Category,
}

/// Outward rounding of a continuous domain before it reaches an axis.
pub trait DomainRounding: fmt::Debug + Send + Sync {
    fn id(&self) -> &'static str;
    fn round(&self, min: f64, max: f64, tick_count: usize) -> (f64, f64);
}

/// Extend bounds to the enclosing multiples of a 1/2/5 x 10^n tick step.
#[derive(Clone, Copy, Debug, Default)]
pub struct NiceRounding;

impl DomainRounding for NiceRounding {
    fn id(&self) -> &'static str { "nice" }
    fn round(&self, min: f64, max: f64, tick_count: usize) -> (f64, f64) { nice(min, max, tick_count) }
}

/// Raw data extent, no rounding.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityRounding;

impl DomainRounding for IdentityRounding {
    fn id(&self) -> &'static str { "identity" }
    fn round(&self, min: f64, max: f64, _tick_count: usize) -> (f64, f64) { (min, max) }
}

/// Which points count as "selected" for the value extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Membership {
    /// A point belongs to the category named by its key (dot chart answers).
    PointKey,
    /// Every point of a selected series belongs (line chart regions).
    Entity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recompute {
    AtLoad,
    OnSelectionChange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomainPolicy {
    pub membership: Membership,
    pub recompute: Recompute,
    /// Anchor the lower bound at zero (`[0, max]`).
    pub include_zero: bool,
    pub nice_count: usize,
}

impl DomainPolicy {
    pub fn dot_chart() -> Self {
        Self { membership: Membership::PointKey, recompute: Recompute::AtLoad, include_zero: true, nice_count: 10 }
    }

    pub fn line_chart() -> Self {
        Self {
            membership: Membership::Entity,
            recompute: Recompute::OnSelectionChange,
            include_zero: false,
            nice_count: 10,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DomainEngine {
    policy: DomainPolicy,
    rounding: Arc<dyn DomainRounding>,
}

impl DomainEngine {
    pub fn new(policy: DomainPolicy) -> Self {
        Self { policy, rounding: Arc::new(NiceRounding) }
    }

    pub fn with_rounding(mut self, rounding: impl DomainRounding + 'static) -> Self {
        self.rounding = Arc::new(rounding);
        self
    }

    pub fn rounding_id(&self) -> &'static str { self.rounding.id() }

    pub fn compute_domain(&self, series: &[Series], selected: &SelectionSet, axis: AxisKind) -> AxisDomain {
        match axis {
            AxisKind::Category => AxisDomain::Categorical {
                categories: series.iter().map(|s| s.entity.clone()).collect(),
            },
            AxisKind::Value => {
                let (mut min, mut max) = match self.value_extent(series, selected) {
                    Some(ext) => ext,
                    None => return AxisDomain::Continuous { min: 0.0, max: 1.0 },
                };
                if self.policy.include_zero {
                    min = min.min(0.0);
                    max = max.max(0.0);
                }
                let (min, max) = self.rounding.round(min, max, self.policy.nice_count);
                AxisDomain::Continuous { min, max }
            }
        }
    }

    /// Next value-axis domain after a selection change. Charts whose policy
    /// fixes the domain at load keep `current` untouched.
    pub fn on_selection_change(&self, current: &AxisDomain, series: &[Series], selected: &SelectionSet) -> AxisDomain {
        match self.policy.recompute {
            Recompute::AtLoad => current.clone(),
            Recompute::OnSelectionChange => self.compute_domain(series, selected, AxisKind::Value),
        }
    }

    /// (min, max) over the values of selected points, or None when nothing qualifies.
    pub fn value_extent(&self, series: &[Series], selected: &SelectionSet) -> Option<(f64, f64)> {
        let merge = |acc: Option<(f64, f64)>, (lo, hi): (f64, f64)| match acc {
            None => Some((lo, hi)),
            Some((a, b)) => Some((a.min(lo), b.max(hi))),
        };
        match self.policy.membership {
            Membership::Entity => series
                .iter()
                .filter(|s| selected.is_selected(&s.entity))
                .filter_map(Series::extent)
                .fold(None, merge),
            Membership::PointKey => series
                .iter()
                .flat_map(|s| s.points.iter())
                .filter(|p| p.key.as_category().map_or(false, |c| selected.is_selected(c)))
                .map(|p| (p.value, p.value))
                .fold(None, merge),
        }
    }
}
