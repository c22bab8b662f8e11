use super::*;

/// Oldest entries are dropped beyond this.
const LOG_LIMIT: usize = 500;

impl App {
    fn push_entry(&mut self, kind: EntryKind, lines: Vec<String>) {
        let entry = ScrollEntry {
            ts: now_ts(),
            kind,
            lines,
        };
        self.log.push(entry.clone());
        if self.log.len() > LOG_LIMIT {
            let excess = self.log.len() - LOG_LIMIT;
            self.log.drain(..excess);
        }
        if entry.kind != EntryKind::Command {
            self.last_result = Some(entry);
        }
    }

    pub(super) fn push_command(&mut self, line: String) {
        self.last_command = Some(line.clone());
        self.push_entry(EntryKind::Command, vec![line]);
    }

    pub(in crate::tui_shell) fn push_output(&mut self, lines: Vec<String>) {
        self.push_entry(EntryKind::Output, lines);
    }

    pub(in crate::tui_shell) fn push_error(&mut self, msg: String) {
        tracing::debug!(error = %msg, "console error");
        self.push_entry(EntryKind::Error, vec![msg]);
    }

    /// An itemized failure: the first line is the summary.
    pub(super) fn push_error_lines(&mut self, lines: Vec<String>) {
        if lines.is_empty() {
            self.push_error("failed".to_string());
        } else {
            self.push_entry(EntryKind::Error, lines);
        }
    }

    pub(super) fn open_viewer(&mut self, title: impl Into<String>, lines: Vec<String>) {
        self.modal = Some(Modal {
            title: title.into(),
            kind: ModalKind::Viewer,
            lines,
            scroll: 0,
        });
    }

    /// Hold `action` until the operator confirms it.
    pub(super) fn confirm(&mut self, title: impl Into<String>, lines: Vec<String>, action: PendingAction) {
        self.modal = Some(Modal {
            title: title.into(),
            kind: ModalKind::Confirm(action),
            lines,
            scroll: 0,
        });
    }

    /// Scrollback of everything this session printed.
    pub(super) fn open_log(&mut self) {
        let lines = self
            .log
            .iter()
            .flat_map(|e| {
                let marker = match e.kind {
                    EntryKind::Command => ">",
                    EntryKind::Output => " ",
                    EntryKind::Error => "!",
                };
                e.lines
                    .iter()
                    .enumerate()
                    .map(move |(i, l)| {
                        if i == 0 {
                            format!("{} {} {}", e.ts, marker, l)
                        } else {
                            format!("           {}", l)
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        self.open_viewer("Log", lines);
    }
}
