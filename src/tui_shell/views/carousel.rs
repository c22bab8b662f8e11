use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{CarouselReport, EntryState};
use crate::reconcile::ReportReconciler;

use super::super::view::{RenderCtx, View, entry_color, render_view_chrome};
use super::grid::{GridSurface, bar};

const BAR_WIDTH: usize = 24;

/// Streams are reconciled as a single-column grid; the file rows below each
/// stream come straight from the last report.
pub(in crate::tui_shell) struct CarouselView {
    pub(in crate::tui_shell) streams: ReportReconciler<GridSurface>,
    pub(in crate::tui_shell) report: Option<CarouselReport>,
}

impl CarouselView {
    pub(in crate::tui_shell) fn new() -> Self {
        Self {
            streams: ReportReconciler::new(GridSurface::default(), 1),
            report: None,
        }
    }

    pub(in crate::tui_shell) fn apply(&mut self, report: CarouselReport) {
        self.streams.on_report(&report.to_status_report());
        self.report = Some(report);
    }

    /// State of the stream at report position `index`. Streams may share an
    /// address, so cells are found by position rather than by key.
    pub(in crate::tui_shell) fn stream_state(&self, index: usize) -> Option<EntryState> {
        self.streams.surface().cells.get(index).map(|c| c.state)
    }
}

fn mbps(bps: u64) -> String {
    format!("{:.2} Mbps", bps as f64 / 1_000_000.0)
}

impl View for CarouselView {
    fn title(&self) -> &str {
        "Carousel"
    }

    fn updated_at(&self) -> &str {
        self.streams.surface().timestamp()
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let surface = self.streams.surface();
        let body = surface.render_banner(frame, inner);

        let Some(report) = &self.report else {
            return;
        };
        if surface.cells.is_empty() {
            return;
        }

        let reference = report.bitrate_reference();
        let mut lines = Vec::new();
        if let Some(start) = &report.start {
            let mut head = format!("running since {}", start);
            if report.timing.overshoot_protection {
                head.push_str("  overshoot protection");
            }
            lines.push(Line::from(Span::styled(head, Style::default().fg(Color::Gray))));
        }
        for (i, stream) in report.streams.iter().enumerate() {
            let key = stream.key();
            let state = self.stream_state(i);
            let mut spans = vec![
                Span::styled(
                    format!("udp://{:<22}", key),
                    Style::default().fg(state.map(entry_color).unwrap_or(Color::White)),
                ),
                Span::raw(format!(" {} ", bar(stream.bitrate, reference, BAR_WIDTH))),
                Span::raw(mbps(stream.bitrate)),
            ];
            if stream.pcr {
                spans.push(Span::styled("  PCR", Style::default().fg(Color::Cyan)));
            }
            if let Some(badge) = stream.tdt_badge() {
                spans.push(Span::styled(
                    format!("  TDT {}", badge),
                    Style::default().fg(Color::Yellow),
                ));
            }
            lines.push(Line::from(spans));

            for file in &stream.files {
                let pid = file.pid.map(|p| format!("{:#06x}", p)).unwrap_or_default();
                let mut flags = String::new();
                if file.tdt {
                    flags.push_str(" TDT");
                }
                if file.pcr {
                    flags.push_str(" PCR");
                }
                lines.push(Line::from(vec![
                    Span::raw(format!("    {:<24.24} {:>6} ", file.title, pid)),
                    Span::raw(format!("{} ", bar(file.bitrate, reference, BAR_WIDTH))),
                    Span::raw(mbps(file.bitrate)),
                    Span::styled(
                        format!("  {} B  last {}{}", file.size, file.last, flags),
                        Style::default().fg(Color::Gray),
                    ),
                ]));
            }
        }
        frame.render_widget(Paragraph::new(lines), body);
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/carousel_tests.rs"]
mod tests;
