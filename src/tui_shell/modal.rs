use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &super::Modal) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 100);
    let h = area.height.saturating_sub(6).clamp(8, 30);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    let box_area = ratatui::layout::Rect {
        x,
        y,
        width: w,
        height: h,
    };

    frame.render_widget(ratatui::widgets::Clear, box_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(modal.title.as_str());
    frame.render_widget(block.clone(), box_area);
    let inner = block.inner(box_area);

    let lines: Vec<Line> = modal.lines.iter().map(|s| Line::from(s.as_str())).collect();
    let scroll = modal.scroll.min(modal.lines.len().saturating_sub(1)) as u16;

    match &modal.kind {
        super::ModalKind::Viewer => {
            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .scroll((scroll, 0)),
                inner,
            );
        }

        super::ModalKind::Confirm(_) => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(2)])
                .split(inner);
            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .scroll((scroll, 0)),
                parts[0],
            );
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "y/Enter confirm, n/Esc cancel",
                    Style::default().fg(Color::Yellow),
                )))
                .block(Block::default().borders(Borders::TOP)),
                parts[1],
            );
        }
    }
}

pub(super) fn handle_modal_key(app: &mut super::App, key: KeyEvent) {
    enum ModalAction {
        None,
        Close,
        Confirm(super::PendingAction),
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }

    let action = {
        let Some(m) = app.modal.as_mut() else {
            return;
        };
        let max_scroll = m.lines.len().saturating_sub(1);

        match key.code {
            KeyCode::Up => {
                m.scroll = m.scroll.saturating_sub(1);
                ModalAction::None
            }
            KeyCode::Down => {
                m.scroll = (m.scroll + 1).min(max_scroll);
                ModalAction::None
            }
            KeyCode::PageUp => {
                m.scroll = m.scroll.saturating_sub(10);
                ModalAction::None
            }
            KeyCode::PageDown => {
                m.scroll = (m.scroll + 10).min(max_scroll);
                ModalAction::None
            }
            code => match &m.kind {
                super::ModalKind::Viewer => match code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => ModalAction::Close,
                    _ => ModalAction::None,
                },
                super::ModalKind::Confirm(pending) => match code {
                    KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                        ModalAction::Confirm(pending.clone())
                    }
                    KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => ModalAction::Close,
                    _ => ModalAction::None,
                },
            },
        }
    };

    match action {
        ModalAction::None => {}
        ModalAction::Close => {
            if matches!(
                app.modal.as_ref().map(|m| &m.kind),
                Some(super::ModalKind::Confirm(_))
            ) {
                app.push_output(vec!["cancelled".to_string()]);
            }
            app.modal = None;
        }
        ModalAction::Confirm(pending) => {
            app.modal = None;
            app.run_pending(pending);
        }
    }
}
