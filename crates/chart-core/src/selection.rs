// File: crates/chart-core/src/selection.rs
// Summary: Toggle state machine over the selectable categories shared by legend and chart.
// Notes:
// - `SelectionSet` is an immutable snapshot; `toggle` returns the next snapshot.
// - The set is never empty: removing the last member resets to every category.

use std::sync::Arc;

use log::{debug, error};

use crate::error::{ChartError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionState {
    /// Every category selected; nothing is muted.
    All,
    /// A strict, non-empty subset.
    Partial,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionSet {
    universe: Arc<[String]>,
    selected: Vec<bool>,
}

impl SelectionSet {
    /// Everything selected. `universe` order is kept for iteration.
    /// An empty universe yields an empty set; callers reject empty datasets
    /// before building one.
    pub fn all(universe: Vec<String>) -> Self {
        let selected = vec![true; universe.len()];
        Self { universe: universe.into(), selected }
    }

    /// Start from an explicit subset (replay, tests). An empty subset resets to All.
    pub fn with_selected<I, S>(universe: Vec<String>, ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self { selected: vec![false; universe.len()], universe: universe.into() };
        for id in ids {
            let i = set.index_of(id.as_ref())?;
            set.selected[i] = true;
        }
        Ok(set.guard_non_empty())
    }

    pub fn toggle(&self, id: &str) -> Result<Self> {
        let i = self.index_of(id)?;
        let mut next = self.clone();
        next.selected[i] = !next.selected[i];
        if next.selected.iter().all(|s| !s) {
            debug!("last selected category '{}' removed; resetting to all", id);
            next.selected.fill(true);
        }
        Ok(next.guard_non_empty())
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.universe
            .iter()
            .position(|c| c == id)
            .map(|i| self.selected[i])
            .unwrap_or(false)
    }

    /// Legend muting: only unselected categories are muted, so All mutes nothing.
    pub fn is_muted(&self, id: &str) -> bool { !self.is_selected(id) }

    pub fn state(&self) -> SelectionState {
        if self.selected.iter().all(|s| *s) { SelectionState::All } else { SelectionState::Partial }
    }

    pub fn universe(&self) -> &[String] { &self.universe }

    /// Selected categories in universe order.
    pub fn selected(&self) -> impl Iterator<Item = &str> + '_ {
        self.universe
            .iter()
            .zip(&self.selected)
            .filter(|(_, s)| **s)
            .map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize { self.selected.iter().filter(|s| **s).count() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.universe
            .iter()
            .position(|c| c == id)
            .ok_or_else(|| ChartError::UnknownCategory(id.to_string()))
    }

    fn guard_non_empty(mut self) -> Self {
        if !self.universe.is_empty() && self.is_empty() {
            error!("{}; resetting to all", ChartError::EmptySelectionInvariantViolation);
            self.selected.fill(true);
        }
        self
    }
}
