use std::path::PathBuf;

use crate::remote::ExportFormat;

use super::*;

impl App {
    pub(super) fn refresh_chunk_list(&mut self) {
        let client = self.client.clone();
        self.spawn(async move { TaskDone::ChunkList(client.list_chunks().await) });
    }

    pub(super) fn refresh_scheme_list(&mut self) {
        let client = self.client.clone();
        self.spawn(async move { TaskDone::SchemeList(client.list_schemes().await) });
        let client = self.client.clone();
        self.spawn(async move { TaskDone::CurrentScheme(client.current_scheme().await) });
    }

    fn selected_row(&mut self, args: &[String], usage: &str) -> Option<BrowseRow> {
        let n = match parse_index(args, usage) {
            Ok(n) => n,
            Err(msg) => {
                self.push_error(msg);
                return None;
            }
        };
        let row = match self.mode() {
            UiMode::Chunks => self.chunks.row(n).cloned(),
            UiMode::Schemes => self.schemes.row(n).cloned(),
            _ => None,
        };
        if row.is_none() {
            self.push_error(format!("no row #{} in {}", n, self.mode().name()));
        }
        row
    }

    pub(super) fn cmd_delete(&mut self, args: &[String]) {
        let (pending, what) = match self.mode() {
            UiMode::Chunks => (PendingAction::DeleteChunk as fn(String) -> PendingAction, "chunk"),
            UiMode::Schemes => (PendingAction::DeleteScheme as fn(String) -> PendingAction, "scheme"),
            other => {
                self.push_error(format!("delete: not available in {}", other.name()));
                return;
            }
        };
        let Some(row) = self.selected_row(args, "delete <n>") else {
            return;
        };
        self.confirm(
            "Delete",
            vec![
                format!("Delete {} {}?", what, row.target),
                row.label.clone(),
            ],
            pending(row.target),
        );
    }

    pub(super) fn cmd_play(&mut self, args: &[String], action: ChunkAction) {
        if self.mode() != UiMode::Chunks {
            self.push_error(format!("{}: switch to chunks first", action.label()));
            return;
        }
        let usage = if action == ChunkAction::Play {
            "play <n>"
        } else {
            "stop <n>"
        };
        let Some(row) = self.selected_row(args, usage) else {
            return;
        };
        if !row.controllable {
            self.push_error(format!("chunk {}: source not retained", row.target));
            return;
        }
        match (action, row.playing) {
            (ChunkAction::Play, true) => {
                self.push_output(vec![format!("chunk {} is already playing", row.target)]);
                return;
            }
            (ChunkAction::Pause, false) => {
                self.push_output(vec![format!("chunk {} is not playing", row.target)]);
                return;
            }
            _ => {}
        }
        let client = self.client.clone();
        let label = action.label();
        let target = row.target;
        self.spawn(async move {
            let result = client.chunk_action(action, &target).await;
            TaskDone::TargetAction {
                mode: UiMode::Chunks,
                label,
                target,
                result,
            }
        });
    }

    pub(super) fn cmd_preview(&mut self, args: &[String]) {
        if self.mode() != UiMode::Chunks {
            self.push_error("preview: switch to chunks first".to_string());
            return;
        }
        if let Some(row) = self.selected_row(args, "preview <n>") {
            self.start_preview(row.target);
        }
    }

    pub(super) fn start_preview(&mut self, target: String) {
        let client = self.client.clone();
        self.spawn(async move {
            let result = client.preview_chunk(&target).await;
            TaskDone::Preview { target, result }
        });
    }

    /// Toggle the detail pane of the n-th service.
    pub(super) fn cmd_open(&mut self, args: &[String]) {
        if self.mode() != UiMode::Services {
            self.push_error("open: switch to services first".to_string());
            return;
        }
        let n = match parse_index(args, "open <n>") {
            Ok(n) => n,
            Err(msg) => {
                self.push_error(msg);
                return;
            }
        };
        let Some(id) = self.services.grid.id_at(n - 1).cloned() else {
            self.push_error(format!("no service #{}", n));
            return;
        };
        self.services.selected = n - 1;
        if self.services.detail.as_ref().is_some_and(|d| d.id == id) {
            self.services.detail = None;
            return;
        }
        self.services.detail = Some(ServiceDetail {
            id: id.clone(),
            state: DetailState::Loading,
        });
        let client = self.client.clone();
        self.spawn(async move {
            let result = client.service_info(&id).await;
            TaskDone::ServiceDetail { id, result }
        });
    }

    /// `export <xml|csv|all> [path]`: per-service formats use the open detail.
    pub(super) fn cmd_export(&mut self, args: &[String]) {
        if self.mode() != UiMode::Services {
            self.push_error("export: switch to services first".to_string());
            return;
        }
        let usage = "usage: export <xml|csv|all> [path]";
        let Some(raw) = args.first() else {
            self.push_error(usage.to_string());
            return;
        };
        let format = match ExportFormat::parse(raw) {
            Ok(format) => format,
            Err(err) => {
                self.push_error(format!("{}; {}", err, usage));
                return;
            }
        };
        let channel = if format.needs_channel() {
            let Some(detail) = self.services.detail.as_ref() else {
                self.push_error("export: open a service first".to_string());
                return;
            };
            match &detail.state {
                DetailState::Loaded(info) if !info.channel_id.as_str().is_empty() => {
                    info.channel_id.as_str().to_string()
                }
                _ => detail.id.clone(),
            }
        } else {
            String::new()
        };
        let path = args
            .get(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format.file_name(&channel)));
        let client = self.client.clone();
        self.spawn(async move {
            let result = client.export_epg(format, &channel).await;
            TaskDone::Export { path, result }
        });
    }
}
