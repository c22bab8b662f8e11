//! Rebuild-or-patch reconciliation of a status report onto a rendered panel.
//!
//! A report with the same number of entries as the previous one is patched
//! in place, correlating entries by position. Any change in cardinality
//! discards the rendered state and rebuilds the grid from scratch.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ConsoleError;
use crate::layout::GridLayout;
use crate::model::{Entry, EntryId, OverallState, StatusReport};

/// Rendering target of one panel.
///
/// The surface owns whatever visual objects it creates; the reconciler only
/// keeps the handles it is given back.
pub trait PanelSurface {
    type Handle: Clone;

    /// Drop every rendered cell and banner.
    fn clear(&mut self);

    /// Prepare an empty grid of the given layout.
    fn begin_grid(&mut self, layout: &GridLayout);

    /// Create the cell for `id` at `(column, row)`.
    fn create_cell(&mut self, column: usize, row: usize, id: &EntryId) -> Self::Handle;

    /// Update a cell's state, series, label and last-update time.
    fn patch_cell(&mut self, handle: &Self::Handle, entry: &Entry);

    /// Panel-level severity and report time.
    fn set_header(&mut self, overall: OverallState, timestamp: &str);

    fn show_banner(&mut self, overall: OverallState, message: &str);

    fn clear_banner(&mut self);
}

/// What the reconciler last rendered.
#[derive(Clone, Debug, Default)]
pub struct RenderedPanelState {
    pub last_entry_count: usize,
    pub layout: Arc<GridLayout>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Rebuilt,
    Patched,
    Fatal,
}

pub struct ReportReconciler<S: PanelSurface> {
    surface: S,
    max_columns: usize,
    state: RenderedPanelState,
    /// Handles in report order.
    handles: Vec<S::Handle>,
    /// Ids currently shown at each position.
    shown: Vec<EntryId>,
    by_id: HashMap<EntryId, S::Handle>,
    rebuilds: u64,
}

impl<S: PanelSurface> ReportReconciler<S> {
    pub fn new(surface: S, max_columns: usize) -> Self {
        Self {
            surface,
            max_columns: max_columns.max(1),
            state: RenderedPanelState::default(),
            handles: Vec::new(),
            shown: Vec::new(),
            by_id: HashMap::new(),
            rebuilds: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn state(&self) -> &RenderedPanelState {
        &self.state
    }

    pub fn layout(&self) -> &Arc<GridLayout> {
        &self.state.layout
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    pub fn handle_of(&self, id: &str) -> Option<&S::Handle> {
        self.by_id.get(id)
    }

    /// Id shown at report position `index`.
    pub fn id_at(&self, index: usize) -> Option<&EntryId> {
        self.shown.get(index)
    }

    pub fn on_report(&mut self, report: &StatusReport) -> ReconcileOutcome {
        if report.overall == OverallState::Fatal {
            let message = report.message.as_deref().unwrap_or("backend reported a fatal state");
            tracing::warn!(message, "fatal panel state");
            self.reset();
            self.surface.show_banner(OverallState::Fatal, message);
            return ReconcileOutcome::Fatal;
        }

        self.surface.clear_banner();
        let outcome = if report.entry_count() == self.state.last_entry_count {
            ReconcileOutcome::Patched
        } else {
            self.rebuild(report);
            ReconcileOutcome::Rebuilt
        };
        self.patch(report);
        self.surface.set_header(report.overall, &report.timestamp);
        outcome
    }

    /// A poll that failed at transport level keeps the rendered grid and
    /// shows a degraded banner until the next report arrives.
    pub fn on_failure(&mut self, err: &ConsoleError) {
        self.surface.show_banner(OverallState::Degraded, &err.to_string());
    }

    /// Forget everything rendered so the next report forces a rebuild.
    pub fn reset(&mut self) {
        self.surface.clear();
        self.state = RenderedPanelState::default();
        self.handles.clear();
        self.shown.clear();
        self.by_id.clear();
    }

    fn rebuild(&mut self, report: &StatusReport) {
        self.reset();
        let ids: Vec<EntryId> = report.entries.iter().map(|e| e.id.clone()).collect();
        let layout = GridLayout::build(ids.iter(), self.max_columns);
        self.surface.begin_grid(&layout);
        for (c, column) in layout.columns.iter().enumerate() {
            for (r, id) in column.iter().enumerate() {
                let handle = self.surface.create_cell(c, r, id);
                self.by_id.insert(id.clone(), handle.clone());
                self.handles.push(handle);
            }
        }
        self.shown = ids;
        self.state = RenderedPanelState {
            last_entry_count: report.entry_count(),
            layout: Arc::new(layout),
        };
        self.rebuilds += 1;
        tracing::info!(
            entries = report.entry_count(),
            columns = self.state.layout.columns.len(),
            "panel rebuilt"
        );
    }

    fn patch(&mut self, report: &StatusReport) {
        let mut drifted = 0usize;
        for (i, entry) in report.entries.iter().enumerate() {
            let Some(handle) = self.handles.get(i) else {
                break;
            };
            if self.shown[i] != entry.id {
                drifted += 1;
                self.shown[i] = entry.id.clone();
            }
            self.surface.patch_cell(handle, entry);
        }
        if drifted > 0 {
            tracing::warn!(drifted, "entry identity changed at unchanged cardinality");
            self.by_id = self
                .shown
                .iter()
                .cloned()
                .zip(self.handles.iter().cloned())
                .collect();
        }
    }
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
