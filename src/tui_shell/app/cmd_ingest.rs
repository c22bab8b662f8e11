use std::path::Path;

use super::*;

impl App {
    pub(super) fn cmd_upload(&mut self, args: &[String]) {
        let [path] = args else {
            self.push_error("usage: upload <path>".to_string());
            return;
        };
        let file = match UploadFile::read(Path::new(path)) {
            Ok(f) => f,
            Err(err) => {
                self.push_error(err.to_string());
                return;
            }
        };
        match self.mode() {
            UiMode::Services => self.start_service_ingest(file),
            UiMode::Chunks => self.start_upload::<ChunkFlow>(file),
            UiMode::Schemes => {
                self.schemes.activation.clear();
                self.start_upload::<SchemeFlow>(file);
            }
            other => self.push_error(format!("upload: not available in {}", other.name())),
        }
    }

    fn start_service_ingest(&mut self, file: UploadFile) {
        let Some(id) = self.services.detail.as_ref().map(|d| d.id.clone()) else {
            self.push_error("open a service first (open <n>)".to_string());
            return;
        };
        self.push_output(vec![format!("sending {} to service {}...", file.name, id)]);
        let client = self.client.clone();
        self.spawn(async move {
            let result = client.ingest_service_data(&id, &file).await;
            TaskDone::ServiceIngest { id, result }
        });
    }

    fn start_upload<F: ConsoleFlow>(&mut self, file: UploadFile) {
        let ticket = match F::view_mut(self).wizard.begin_upload(&file.name) {
            Ok(t) => t,
            Err(err) => {
                self.push_error(err.to_string());
                return;
            }
        };
        self.push_output(vec![format!("validating {}...", file.name)]);
        let client = self.client.clone();
        self.spawn(async move { F::validated(ticket, client.validate::<F>(&file).await) });
    }

    pub(super) fn cmd_commit(&mut self, args: &[String]) {
        match self.mode() {
            UiMode::Chunks => {
                if !args.is_empty() {
                    self.push_error("usage: commit".to_string());
                    return;
                }
                self.start_commit::<ChunkFlow>(());
            }
            UiMode::Schemes => {
                let mut description = args.join(" ");
                if description.trim().is_empty() {
                    // Fall back to the description embedded in the spreadsheet.
                    if let Some(meta) = self.schemes.wizard.report() {
                        description = meta.description.clone();
                    }
                }
                self.start_commit::<SchemeFlow>(SchemeCommit { description });
            }
            other => self.push_error(format!("commit: not available in {}", other.name())),
        }
    }

    fn start_commit<F: ConsoleFlow>(&mut self, input: F::CommitInput) {
        let req = match F::view_mut(self).wizard.begin_commit(input) {
            Ok(r) => r,
            Err(err) => {
                self.push_error(err.to_string());
                return;
            }
        };
        self.push_output(vec![format!("saving {}...", F::NAME)]);
        let client = self.client.clone();
        self.spawn(async move {
            let result = client.commit::<F>(&req).await;
            F::committed(req.ticket, result)
        });
    }

    pub(super) fn cmd_stage(&mut self, args: &[String]) {
        if self.mode() != UiMode::Schemes {
            self.push_error("stage: only archived schemes can be staged".to_string());
            return;
        }
        let n = match parse_index(args, "stage <n>") {
            Ok(n) => n,
            Err(msg) => {
                self.push_error(msg);
                return;
            }
        };
        let Some(target) = self.schemes.row(n).map(|r| r.target.clone()) else {
            self.push_error(format!("no scheme #{}", n));
            return;
        };
        let ticket = match self.schemes.wizard.begin_stage_existing(&target) {
            Ok(t) => t,
            Err(err) => {
                self.push_error(err.to_string());
                return;
            }
        };
        self.schemes.activation.clear();
        self.push_output(vec![format!("preparing scheme {}...", target)]);
        let client = self.client.clone();
        self.spawn(async move {
            let result = client.stage_existing::<SchemeFlow>(&target).await;
            TaskDone::SchemeValidated(ticket, result)
        });
    }

    pub(super) fn cmd_activate(&mut self, args: &[String], kind: ActivationKind) {
        if self.mode() != UiMode::Schemes {
            self.push_error(format!("{}: switch to schemes first", kind.as_str()));
            return;
        }
        let options = match ActivationOptions::parse(args.iter().map(String::as_str)) {
            Ok(o) => o,
            Err(err) => {
                self.push_error(err.to_string());
                return;
            }
        };

        let mut lines = Vec::new();
        let action = match kind {
            ActivationKind::LoadScheme => {
                if let Err(err) = self.schemes.wizard.activation_token() {
                    self.push_error(err.to_string());
                    return;
                }
                lines.push("Load this scheme on the backend?".to_string());
                lines.extend(self.schemes.wizard.status_lines());
                PendingAction::Activate(options)
            }
            ActivationKind::Maintain => {
                lines.push("Run maintenance actions?".to_string());
                PendingAction::Maintain(options)
            }
        };
        lines.push(String::new());
        lines.extend(option_lines(&options));
        self.confirm(kind.as_str(), lines, action);
    }

    pub(super) fn cmd_new(&mut self) {
        match self.mode() {
            UiMode::Chunks => self.chunks.wizard.reset(),
            UiMode::Schemes => {
                self.schemes.wizard.reset();
                self.schemes.activation.clear();
            }
            other => {
                self.push_error(format!("new: not available in {}", other.name()));
                return;
            }
        }
        self.push_output(vec![format!("new {} session", self.mode().name())]);
    }

    /// Carry out an action the operator just confirmed.
    pub(in crate::tui_shell) fn run_pending(&mut self, action: PendingAction) {
        let client = self.client.clone();
        match action {
            PendingAction::DeleteChunk(target) => self.spawn(async move {
                let result = client.chunk_action(ChunkAction::Delete, &target).await;
                TaskDone::TargetAction {
                    mode: UiMode::Chunks,
                    label: "delete",
                    target,
                    result,
                }
            }),
            PendingAction::DeleteScheme(target) => self.spawn(async move {
                let result = client.delete_scheme(&target).await;
                TaskDone::TargetAction {
                    mode: UiMode::Schemes,
                    label: "delete",
                    target,
                    result,
                }
            }),
            PendingAction::Activate(options) => {
                // The session may have moved on while the dialog was open.
                let token = match self.schemes.wizard.activation_token() {
                    Ok(t) => t,
                    Err(err) => {
                        self.push_error(err.to_string());
                        return;
                    }
                };
                self.push_output(vec!["loading scheme...".to_string()]);
                self.spawn(async move {
                    let result = client
                        .activate(ActivationKind::LoadScheme, &options, Some(&token))
                        .await;
                    TaskDone::Activated(ActivationKind::LoadScheme, result)
                });
            }
            PendingAction::Maintain(options) => {
                self.push_output(vec!["running maintenance...".to_string()]);
                self.spawn(async move {
                    let result = client.activate(ActivationKind::Maintain, &options, None).await;
                    TaskDone::Activated(ActivationKind::Maintain, result)
                });
            }
        }
    }
}

fn option_lines(options: &ActivationOptions) -> Vec<String> {
    [
        ("stop carousel", options.stop_carousel),
        ("reset database", options.reset_database),
        ("import scheme", options.import_scheme),
        ("stop EIT", options.stop_eit),
        ("delete carousel", options.delete_carousel),
    ]
    .into_iter()
    .map(|(name, on)| format!("[{}] {}", if on { "x" } else { " " }, name))
    .collect()
}
