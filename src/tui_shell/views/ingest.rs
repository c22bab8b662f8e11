//! Wizard state plus the archive listing of one ingestion flow.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::ingest::{IngestFlow, IngestionWizard, WizardStep};
use crate::model::{ChunkListing, SchemeListing, SchemeSummary};

use super::super::view::{RenderCtx, View, render_view_chrome};

#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct BrowseRow {
    pub(in crate::tui_shell) target: String,
    pub(in crate::tui_shell) label: String,
    pub(in crate::tui_shell) playing: bool,
    /// Source retained on the backend, so play/pause apply.
    pub(in crate::tui_shell) controllable: bool,
}

impl From<&ChunkListing> for BrowseRow {
    fn from(c: &ChunkListing) -> Self {
        let mut label = format!("{}  -> {}  {}", c.title(), c.destination(), c.timestamp);
        if c.playing {
            label.push_str("  [playing]");
        }
        Self {
            target: c.target.to_string(),
            label,
            playing: c.playing,
            controllable: c.ets,
        }
    }
}

impl From<&SchemeListing> for BrowseRow {
    fn from(s: &SchemeListing) -> Self {
        Self {
            target: s.target.to_string(),
            label: format!(
                "{}  {}  services {} / eit {} / rules {}  {}",
                s.description, s.source, s.channel, s.eit, s.rule, s.timestamp
            ),
            playing: false,
            controllable: false,
        }
    }
}

pub(in crate::tui_shell) struct IngestView<F: IngestFlow> {
    pub(in crate::tui_shell) wizard: IngestionWizard<F>,
    pub(in crate::tui_shell) rows: Vec<BrowseRow>,
    pub(in crate::tui_shell) selected: usize,
    pub(in crate::tui_shell) listed_at: String,
    pub(in crate::tui_shell) list_error: Option<String>,
    /// Currently loaded scheme, for the scheme flow.
    pub(in crate::tui_shell) current: Option<SchemeSummary>,
    pub(in crate::tui_shell) activation: Vec<String>,
    title: &'static str,
}

impl<F: IngestFlow> IngestView<F> {
    pub(in crate::tui_shell) fn new(title: &'static str) -> Self {
        Self {
            wizard: IngestionWizard::new(),
            rows: Vec::new(),
            selected: 0,
            listed_at: String::new(),
            list_error: None,
            current: None,
            activation: Vec::new(),
            title,
        }
    }

    pub(in crate::tui_shell) fn set_rows(&mut self, rows: Vec<BrowseRow>, at: String) {
        self.rows = rows;
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
        self.listed_at = at;
        self.list_error = None;
    }

    /// Row by 1-based index as typed by the user.
    pub(in crate::tui_shell) fn row(&self, n: usize) -> Option<&BrowseRow> {
        n.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    fn wizard_lines(&self) -> Vec<Line<'static>> {
        let step = self.wizard.step();
        let color = match step {
            WizardStep::Failed => Color::Red,
            WizardStep::Committed => Color::Green,
            WizardStep::Staged => Color::Cyan,
            _ => Color::White,
        };
        let mut lines: Vec<Line> = self
            .wizard
            .status_lines()
            .into_iter()
            .enumerate()
            .map(|(i, l)| {
                if i == 0 {
                    Line::from(Span::styled(l, Style::default().fg(color)))
                } else {
                    Line::from(l)
                }
            })
            .collect();
        if let Some(cur) = &self.current {
            lines.push(Line::from(Span::styled(
                format!(
                    "loaded scheme: {} ({}, {})",
                    cur.description, cur.source, cur.timestamp
                ),
                Style::default().fg(Color::Gray),
            )));
        }
        lines.extend(self.activation.iter().cloned().map(Line::from));
        lines
    }
}

impl<F: IngestFlow> View for IngestView<F> {
    fn title(&self) -> &str {
        self.title
    }

    fn updated_at(&self) -> &str {
        &self.listed_at
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(10), Constraint::Min(0)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(self.wizard_lines())
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::BOTTOM)),
            parts[0],
        );

        if let Some(err) = &self.list_error {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    err.as_str(),
                    Style::default().fg(Color::Yellow),
                ))),
                parts[1],
            );
            return;
        }
        if self.rows.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "(archive empty)",
                    Style::default().fg(Color::Gray),
                ))),
                parts[1],
            );
            return;
        }

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let style = if r.playing {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>3} ", i + 1), Style::default().fg(Color::Gray)),
                    Span::styled(r.label.clone(), style),
                ]))
            })
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, parts[1], &mut state);
    }
}
