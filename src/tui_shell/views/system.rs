use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::model::SystemReport;
use crate::remote::UpdateState;

use super::super::view::{RenderCtx, View, entry_color, render_view_chrome};

#[derive(Default)]
pub(in crate::tui_shell) struct SystemView {
    pub(in crate::tui_shell) report: Option<SystemReport>,
    pub(in crate::tui_shell) error: Option<String>,
    pub(in crate::tui_shell) update: Option<UpdateState>,
}

impl SystemView {
    pub(in crate::tui_shell) fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if let Some(err) = &self.error {
            lines.push(Line::from(Span::styled(
                err.clone(),
                Style::default().fg(Color::Yellow),
            )));
        }
        match &self.update {
            Some(UpdateState::UpToDate(msg)) => lines.push(Line::from(format!("update: {}", msg))),
            Some(UpdateState::Available(msg)) => lines.push(Line::from(Span::styled(
                format!("update available: {} (run `update` again to apply)", msg),
                Style::default().fg(Color::Cyan),
            ))),
            Some(UpdateState::Failed(msg)) => lines.push(Line::from(Span::styled(
                format!("update check failed: {}", msg),
                Style::default().fg(Color::Red),
            ))),
            Some(UpdateState::Unknown) | None => {}
        }

        let Some(report) = &self.report else {
            return lines;
        };
        if let Some(start) = &report.system_start {
            lines.push(Line::from(format!("system start: {}", start)));
        }
        let versions = report.version_labels();
        if !versions.is_empty() {
            lines.push(Line::from(Span::styled(
                versions.join("  "),
                Style::default().fg(Color::Gray),
            )));
        }
        lines.push(Line::from(""));
        for (name, module, show_details) in report.module_rows() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<10}", name),
                    Style::default().fg(entry_color(module.state())),
                ),
                Span::raw(module.message.clone()),
            ]));
            if show_details {
                for detail in module.detail_lines() {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", detail),
                        Style::default().fg(Color::Gray),
                    )));
                }
            }
        }
        lines
    }
}

impl View for SystemView {
    fn title(&self) -> &str {
        "System"
    }

    fn updated_at(&self) -> &str {
        self.report.as_ref().map(|r| r.timestamp.as_str()).unwrap_or("")
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        frame.render_widget(
            Paragraph::new(self.lines()).wrap(Wrap { trim: false }),
            inner,
        );
    }
}
