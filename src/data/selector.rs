//! View selection: which single series and direction is on screen.
//!
//! The selector is a small state machine: no selection until the catalog
//! first becomes non-empty (auto-selects the aggregate + write), then a
//! single series/direction pair for the rest of the session. Every
//! transition recomputes the visibility flags so that at most one series
//! has a visible buffer; redrawing is left to whoever consumes the
//! resulting change event.

use super::catalog::Catalog;
use super::changes::{Change, ChangeQueue};
use super::registry::Registry;

/// Which rate buffer of the selected series is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Read,
    #[default]
    Write,
}

impl Direction {
    pub fn toggle(self) -> Self {
        match self {
            Direction::Read => Direction::Write,
            Direction::Write => Direction::Read,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Read => "read",
            Direction::Write => "write",
        }
    }
}

/// Tracks the currently viewed series and direction.
#[derive(Debug, Clone, Default)]
pub struct ViewSelector {
    selected: Option<String>,
    direction: Direction,
}

impl ViewSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected series name, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Pick the catalog's first entry + write when the catalog first
    /// becomes non-empty. With "total" present that is always the
    /// aggregate, since it sorts first. Returns whether a selection was
    /// made.
    pub fn auto_select(
        &mut self,
        catalog: &Catalog,
        registry: &mut Registry,
        changes: &mut ChangeQueue,
    ) -> bool {
        if self.selected.is_some() || catalog.is_empty() {
            return false;
        }
        self.selected = Some(catalog.names()[0].clone());
        self.direction = Direction::Write;
        self.apply(registry, changes);
        true
    }

    /// Select a series by name.
    ///
    /// Unknown names are a no-op: snapshots can race with registry
    /// updates, so a miss is skipped, never fatal.
    pub fn select_series(&mut self, name: &str, registry: &mut Registry, changes: &mut ChangeQueue) {
        if registry.get(name).is_none() {
            return;
        }
        if self.selected.as_deref() == Some(name) {
            return;
        }
        self.selected = Some(name.to_string());
        self.apply(registry, changes);
    }

    /// Switch the viewed direction.
    pub fn select_direction(
        &mut self,
        direction: Direction,
        registry: &mut Registry,
        changes: &mut ChangeQueue,
    ) {
        if self.direction == direction {
            return;
        }
        self.direction = direction;
        self.apply(registry, changes);
    }

    pub fn toggle_direction(&mut self, registry: &mut Registry, changes: &mut ChangeQueue) {
        self.select_direction(self.direction.toggle(), registry, changes);
    }

    /// Recompute all visibility flags from the current selection: the
    /// selected series shows exactly its selected-direction buffer, every
    /// other flag is cleared.
    fn apply(&self, registry: &mut Registry, changes: &mut ChangeQueue) {
        for series in registry.iter_mut() {
            let selected = self.selected.as_deref() == Some(series.name.as_str());
            series.write.visible = selected && self.direction == Direction::Write;
            series.read.visible = selected && self.direction == Direction::Read;
        }
        changes.push(Change::Visibility);
    }
}
