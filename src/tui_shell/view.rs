use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use crate::model::{EntryState, OverallState};

#[derive(Clone, Copy, Debug)]
pub(super) struct RenderCtx {
    pub(super) paused: bool,
    pub(super) loading: bool,
}

pub(super) trait View {
    fn title(&self) -> &str;
    fn updated_at(&self) -> &str;

    fn move_up(&mut self) {}
    fn move_down(&mut self) {}

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx);
}

pub(super) fn render_view_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    updated_at: &str,
    area: Rect,
    ctx: &RenderCtx,
) -> Rect {
    let mut spans = vec![
        Span::styled(title.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(updated_at.to_string(), Style::default().fg(Color::Gray)),
    ];
    if ctx.loading {
        spans.push(Span::styled("  loading", Style::default().fg(Color::Cyan)));
    }
    if ctx.paused {
        spans.push(Span::styled("  paused", Style::default().fg(Color::Magenta)));
    }

    let outer = Block::default().borders(Borders::ALL).title(Line::from(spans));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}

pub(super) fn overall_color(state: OverallState) -> Color {
    match state {
        OverallState::Ok => Color::Green,
        OverallState::Degraded => Color::Yellow,
        OverallState::Error | OverallState::Fatal => Color::Red,
    }
}

pub(super) fn entry_color(state: EntryState) -> Color {
    match state {
        EntryState::Ok => Color::Green,
        EntryState::Warn => Color::Yellow,
        EntryState::Error => Color::Red,
    }
}
