use super::super::commands::{global_command_defs, mode_command_defs};
use super::super::suggest::score_def;
use super::*;

impl App {
    /// Commands usable in the current view, view-specific ones first.
    pub(super) fn available_command_defs(&self) -> Vec<CommandDef> {
        let mut defs = mode_command_defs(self.mode());
        defs.extend(global_command_defs());
        defs
    }

    fn view_command_names(&self) -> Vec<&'static str> {
        mode_command_defs(self.mode())
            .into_iter()
            .map(|d| d.name)
            .collect()
    }

    pub(super) fn recompute_suggestions(&mut self) {
        let show = self.input.buf.trim_start().starts_with('/');
        let q = self.input.buf.trim_start_matches('/').trim().to_lowercase();
        if q.is_empty() {
            if show {
                self.suggestions = self.available_command_defs();
            } else {
                self.suggestions.clear();
            }
            self.suggestion_selected = 0;
            return;
        }

        // Arguments are being typed; the palette only matches the command word.
        let first = q.split_whitespace().next().unwrap_or("");
        if q.contains(char::is_whitespace) && !show {
            self.suggestions.clear();
            self.suggestion_selected = 0;
            return;
        }

        let mut scored: Vec<(i32, CommandDef)> = self
            .available_command_defs()
            .into_iter()
            .map(|d| (score_def(first, &d), d))
            .filter(|(score, _)| *score > 0)
            .collect();
        let view_commands = self.view_command_names();
        sort_scored_suggestions(&mut scored, &view_commands);
        self.suggestions = scored.into_iter().map(|(_, d)| d).collect();
        self.suggestion_selected = self
            .suggestion_selected
            .min(self.suggestions.len().saturating_sub(1));
    }

    pub(super) fn apply_selected_suggestion(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        let show = self.input.buf.trim_start().starts_with('/');
        let sel = self
            .suggestion_selected
            .min(self.suggestions.len().saturating_sub(1));
        let cmd = self.suggestions[sel].name;

        let prefix = if show { "/" } else { "" };
        let raw = self.input.buf.trim_start_matches('/').trim_start();
        let mut iter = raw.splitn(2, char::is_whitespace);
        let _first = iter.next();
        let rest = iter.next().unwrap_or("").trim_start();

        if rest.is_empty() {
            self.input.set(format!("{}{} ", prefix, cmd));
        } else {
            self.input.set(format!("{}{} {}", prefix, cmd, rest));
        }
        self.recompute_suggestions();
    }

    pub(super) fn run_current_input(&mut self) {
        let line = self.input.buf.trim().to_string();
        if line.is_empty() {
            return;
        }

        self.input.push_history(&line);
        self.push_command(format!("{} {}", self.prompt(), line));
        self.input.clear();
        self.suggestions.clear();
        self.suggestion_selected = 0;

        let line = line.strip_prefix('/').unwrap_or(&line).trim();
        let tokens = match tokenize(line) {
            Ok(t) => t,
            Err(err) => {
                self.push_error(format!("parse error: {}", err));
                return;
            }
        };
        let Some((first, args)) = tokens.split_first() else {
            return;
        };

        let defs = self.available_command_defs();
        let Some(cmd) = resolve_command(&defs, &first.to_lowercase()) else {
            self.push_error(format!("unknown command: {} (try `help`)", first));
            return;
        };

        self.dispatch(cmd, args);
    }

    fn dispatch(&mut self, cmd: &'static str, args: &[String]) {
        if let Some(mode) = UiMode::from_name(cmd) {
            self.set_mode(mode);
            return;
        }
        match cmd {
            "help" => self.cmd_help(args),
            "refresh" => self.refresh_now(),
            "pause" => self.set_paused(true),
            "resume" => self.set_paused(false),
            "update" => self.cmd_update(),
            "log" => self.open_log(),
            "quit" => self.quit = true,

            "open" => self.cmd_open(args),
            "upload" => self.cmd_upload(args),
            "commit" => self.cmd_commit(args),
            "new" => self.cmd_new(),
            "stage" => self.cmd_stage(args),
            "activate" => self.cmd_activate(args, ActivationKind::LoadScheme),
            "maintain" => self.cmd_activate(args, ActivationKind::Maintain),
            "delete" => self.cmd_delete(args),
            "play" => self.cmd_play(args, ChunkAction::Play),
            "stop" => self.cmd_play(args, ChunkAction::Pause),
            "preview" => self.cmd_preview(args),
            "export" => self.cmd_export(args),

            other => self.push_error(format!("{}: not available here", other)),
        }
    }

    fn cmd_help(&mut self, args: &[String]) {
        let defs = self.available_command_defs();
        if let Some(name) = args.first() {
            match resolve_command(&defs, &name.to_lowercase()) {
                Some(cmd) => {
                    if let Some(d) = defs.iter().find(|d| d.name == cmd) {
                        let mut lines = vec![format!("{}  {}", d.usage, d.help)];
                        if !d.aliases.is_empty() {
                            lines.push(format!("aliases: {}", d.aliases.join(", ")));
                        }
                        if matches!(cmd, "activate" | "maintain") {
                            lines.push(
                                "flags: stop-carousel reset-database import-scheme stop-eit delete-carousel"
                                    .to_string(),
                            );
                        }
                        self.push_output(lines);
                    }
                }
                None => self.push_error(format!("unknown command: {}", name)),
            }
            return;
        }

        let lines = defs
            .iter()
            .map(|d| format!("{: <22}{}", d.usage, d.help))
            .collect();
        self.open_viewer(format!("Help: {}", self.mode().name()), lines);
    }

    fn cmd_update(&mut self) {
        let apply = self.update.will_apply();
        let client = self.client.clone();
        self.push_output(vec![if apply {
            "applying update...".to_string()
        } else {
            "checking for updates...".to_string()
        }]);
        self.spawn(async move { TaskDone::Update(client.check_update(apply).await) });
    }

    /// Enter on an empty line.
    pub(super) fn run_default_action(&mut self) {
        match self.mode() {
            UiMode::Services => {
                let n = self.services.selected + 1;
                if self.services.entry_count() > 0 {
                    self.cmd_open(&[n.to_string()]);
                }
            }
            UiMode::Chunks => {
                if let Some(row) = self.chunks.rows.get(self.chunks.selected) {
                    let target = row.target.clone();
                    self.start_preview(target);
                }
            }
            UiMode::Schemes => {
                if !self.schemes.rows.is_empty() {
                    let n = self.schemes.selected + 1;
                    self.cmd_stage(&[n.to_string()]);
                }
            }
            UiMode::Carousel | UiMode::System => self.refresh_now(),
        }
    }
}

/// Exact name, then alias, then an unambiguous prefix.
fn resolve_command(defs: &[CommandDef], word: &str) -> Option<&'static str> {
    if let Some(d) = defs.iter().find(|d| d.name == word) {
        return Some(d.name);
    }
    if let Some(d) = defs.iter().find(|d| d.aliases.iter().any(|&a| a == word)) {
        return Some(d.name);
    }
    let mut matches = defs.iter().filter(|d| d.name.starts_with(word));
    match (matches.next(), matches.next()) {
        (Some(d), None) => Some(d.name),
        _ => None,
    }
}
