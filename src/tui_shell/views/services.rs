use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::{EntryId, ServiceInfo};
use crate::reconcile::ReportReconciler;

use super::super::view::{RenderCtx, View, render_view_chrome};
use super::grid::GridSurface;

pub(in crate::tui_shell) enum DetailState {
    Loading,
    Loaded(Box<ServiceInfo>),
    Failed(String),
}

pub(in crate::tui_shell) struct ServiceDetail {
    pub(in crate::tui_shell) id: EntryId,
    pub(in crate::tui_shell) state: DetailState,
}

pub(in crate::tui_shell) struct ServicesView {
    pub(in crate::tui_shell) grid: ReportReconciler<GridSurface>,
    pub(in crate::tui_shell) selected: usize,
    pub(in crate::tui_shell) detail: Option<ServiceDetail>,
}

impl ServicesView {
    pub(in crate::tui_shell) fn new(max_columns: usize) -> Self {
        Self {
            grid: ReportReconciler::new(GridSurface::default(), max_columns),
            selected: 0,
            detail: None,
        }
    }

    pub(in crate::tui_shell) fn entry_count(&self) -> usize {
        self.grid.state().last_entry_count
    }

    pub(in crate::tui_shell) fn detail_lines(&self) -> Vec<String> {
        let Some(detail) = &self.detail else {
            return Vec::new();
        };
        match &detail.state {
            DetailState::Loading => vec![format!("loading service {}...", detail.id)],
            DetailState::Failed(msg) => vec![format!("service {}: {}", detail.id, msg)],
            DetailState::Loaded(info) => {
                let mut lines = vec![
                    format!("Name: {}", info.name.as_deref().unwrap_or("")),
                    format!("Channel ID: {}", info.channel_id),
                    format!("Codepage: {}", info.codepage),
                    format!("Language: {}", info.language),
                    format!("Max segments: {}", info.maxsegments),
                    format!("Grabber update: {}", info.grabber.update),
                    format!("Grabber URL: {}", info.grabber.url),
                    format!("Parser: {}", info.parser),
                ];
                if !info.events.is_empty() {
                    lines.push(String::new());
                    lines.push("Upcoming events:".to_string());
                    for ev in &info.events {
                        let mut line = format!("{}  {}", ev.time_span, ev.title);
                        if !ev.subtitle.is_empty() {
                            line.push_str(&format!(" ({})", ev.subtitle));
                        }
                        lines.push(line);
                    }
                }
                lines
            }
        }
    }
}

impl View for ServicesView {
    fn title(&self) -> &str {
        "Services"
    }

    fn updated_at(&self) -> &str {
        self.grid.surface().timestamp()
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self) {
        if self.selected + 1 < self.entry_count() {
            self.selected += 1;
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let surface = self.grid.surface();
        let body = surface.render_banner(frame, inner);

        let (grid_area, detail_area) = if self.detail.is_some() {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(12)])
                .split(body);
            (parts[0], Some(parts[1]))
        } else {
            (body, None)
        };

        if surface.cells.is_empty() && surface.banner.is_none() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "(no services)",
                    Style::default().fg(Color::Gray),
                ))),
                grid_area,
            );
        } else {
            surface.render_grid(frame, grid_area, Some(self.selected));
        }

        if let (Some(area), Some(detail)) = (detail_area, &self.detail) {
            let lines: Vec<Line> = self
                .detail_lines()
                .into_iter()
                .map(Line::from)
                .collect();
            frame.render_widget(
                Paragraph::new(lines).wrap(Wrap { trim: false }).block(
                    Block::default()
                        .borders(Borders::TOP)
                        .title(format!("Service {}", detail.id)),
                ),
                area,
            );
        }
    }
}
