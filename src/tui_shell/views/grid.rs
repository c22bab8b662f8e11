//! Terminal rendering target for grid panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::layout::GridLayout;
use crate::model::{Entry, EntryId, EntryState, OverallState};
use crate::reconcile::PanelSurface;

use super::super::view::{entry_color, overall_color};

const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct Cell {
    pub(in crate::tui_shell) column: usize,
    pub(in crate::tui_shell) id: EntryId,
    pub(in crate::tui_shell) label: String,
    pub(in crate::tui_shell) state: EntryState,
    pub(in crate::tui_shell) series: Vec<i64>,
    pub(in crate::tui_shell) last_update: String,
}

#[derive(Default)]
pub(in crate::tui_shell) struct GridSurface {
    pub(in crate::tui_shell) columns: usize,
    /// Cells in report order; a cell's handle is its index.
    pub(in crate::tui_shell) cells: Vec<Cell>,
    pub(in crate::tui_shell) header: Option<(OverallState, String)>,
    pub(in crate::tui_shell) banner: Option<(OverallState, String)>,
}

impl PanelSurface for GridSurface {
    type Handle = usize;

    fn clear(&mut self) {
        self.columns = 0;
        self.cells.clear();
        self.header = None;
    }

    fn begin_grid(&mut self, layout: &GridLayout) {
        self.columns = layout.columns.len();
        self.cells = Vec::with_capacity(layout.len());
    }

    fn create_cell(&mut self, column: usize, _row: usize, id: &EntryId) -> usize {
        self.cells.push(Cell {
            column,
            id: id.clone(),
            label: id.clone(),
            state: EntryState::Ok,
            series: Vec::new(),
            last_update: String::new(),
        });
        self.cells.len() - 1
    }

    fn patch_cell(&mut self, handle: &usize, entry: &Entry) {
        if let Some(cell) = self.cells.get_mut(*handle) {
            cell.id.clone_from(&entry.id);
            cell.label.clone_from(&entry.display_name);
            cell.state = entry.state;
            cell.series.clone_from(&entry.series);
            cell.last_update.clone_from(&entry.last_update);
        }
    }

    fn set_header(&mut self, overall: OverallState, timestamp: &str) {
        self.header = Some((overall, timestamp.to_string()));
    }

    fn show_banner(&mut self, overall: OverallState, message: &str) {
        self.banner = Some((overall, message.to_string()));
    }

    fn clear_banner(&mut self) {
        self.banner = None;
    }
}

impl GridSurface {
    pub(in crate::tui_shell) fn timestamp(&self) -> &str {
        self.header.as_ref().map(|(_, ts)| ts.as_str()).unwrap_or("")
    }

    /// Banner line, if any, followed by the remaining area.
    pub(in crate::tui_shell) fn render_banner(&self, frame: &mut ratatui::Frame, area: Rect) -> Rect {
        let Some((state, msg)) = &self.banner else {
            return area;
        };
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                msg.as_str(),
                Style::default()
                    .fg(overall_color(*state))
                    .add_modifier(Modifier::BOLD),
            ))),
            parts[0],
        );
        parts[1]
    }

    /// Three lines per cell, one ratatui column per grid column.
    pub(in crate::tui_shell) fn render_grid(
        &self,
        frame: &mut ratatui::Frame,
        area: Rect,
        selected: Option<usize>,
    ) {
        if self.columns == 0 {
            return;
        }
        let constraints = vec![Constraint::Ratio(1, self.columns as u32); self.columns];
        let areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        let mut per_column: Vec<Vec<Line>> = vec![Vec::new(); self.columns];
        for (i, cell) in self.cells.iter().enumerate() {
            let Some(lines) = per_column.get_mut(cell.column) else {
                continue;
            };
            let mut name_style = Style::default().fg(entry_color(cell.state));
            if selected == Some(i) {
                name_style = name_style.bg(Color::DarkGray);
            }
            lines.push(Line::from(vec![
                Span::styled(format!("{:>3} ", i + 1), Style::default().fg(Color::Gray)),
                Span::styled(cell.label.clone(), name_style),
            ]));
            lines.push(Line::from(Span::raw(format!(
                "    {}",
                sparkline(&cell.series, 16)
            ))));
            lines.push(Line::from(Span::styled(
                format!("    {}", cell.last_update),
                Style::default().fg(Color::Gray),
            )));
        }
        for (lines, area) in per_column.into_iter().zip(areas.iter()) {
            frame.render_widget(Paragraph::new(lines), *area);
        }
    }
}

/// The last `width` samples as block characters scaled to the largest one.
pub(in crate::tui_shell) fn sparkline(series: &[i64], width: usize) -> String {
    let tail = &series[series.len().saturating_sub(width)..];
    let max = tail.iter().copied().max().unwrap_or(0).max(1);
    tail.iter()
        .map(|&v| {
            let v = v.clamp(0, max);
            let idx = (v as usize * (SPARK.len() - 1)) / max as usize;
            SPARK[idx]
        })
        .collect()
}

/// A `width`-character bar of `value` relative to `reference`.
pub(in crate::tui_shell) fn bar(value: u64, reference: u64, width: usize) -> String {
    let reference = reference.max(1);
    let filled = ((value.min(reference) as u128 * width as u128) / reference as u128) as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

#[cfg(test)]
#[path = "../../tests/tui_shell/grid_tests.rs"]
mod tests;
