//! Background requests and the completions they send back to the loop.

use std::future::Future;
use std::path::PathBuf;

use crate::ingest::{ChunkMetadata, SchemeMetadata};
use crate::model::EntryId;

use super::*;

type Validated<M> = Result<ValidationOutcome<M>, ConsoleError>;

/// Result of one spawned request, applied on the loop thread.
pub(in crate::tui_shell) enum TaskDone {
    ChunkValidated(Ticket, Validated<ChunkMetadata>),
    SchemeValidated(Ticket, Validated<SchemeMetadata>),
    ChunkCommitted(Ticket, Result<(), ConsoleError>),
    SchemeCommitted(Ticket, Result<(), ConsoleError>),
    Activated(ActivationKind, Result<ActivationReport, ConsoleError>),
    ChunkList(Result<Vec<ChunkListing>, ConsoleError>),
    SchemeList(Result<Vec<SchemeListing>, ConsoleError>),
    CurrentScheme(Result<SchemeSummary, ConsoleError>),
    TargetAction {
        mode: UiMode,
        label: &'static str,
        target: String,
        result: Result<bool, ConsoleError>,
    },
    Preview {
        target: String,
        result: Result<String, ConsoleError>,
    },
    ServiceDetail {
        id: EntryId,
        result: Result<ServiceInfo, ConsoleError>,
    },
    ServiceIngest {
        id: EntryId,
        result: Result<CommitAck, ConsoleError>,
    },
    Export {
        path: PathBuf,
        result: Result<Vec<u8>, ConsoleError>,
    },
    Update(Result<UpdateCheck, ConsoleError>),
}

/// Binds an ingestion flow to its view and completion variants.
pub(super) trait ConsoleFlow: IngestFlow + Sized + Send + 'static {
    fn view_mut(app: &mut App) -> &mut IngestView<Self>;
    fn validated(ticket: Ticket, result: Validated<Self::Metadata>) -> TaskDone;
    fn committed(ticket: Ticket, result: Result<(), ConsoleError>) -> TaskDone;
    fn refresh_list(app: &mut App);
}

impl ConsoleFlow for ChunkFlow {
    fn view_mut(app: &mut App) -> &mut IngestView<Self> {
        &mut app.chunks
    }
    fn validated(ticket: Ticket, result: Validated<ChunkMetadata>) -> TaskDone {
        TaskDone::ChunkValidated(ticket, result)
    }
    fn committed(ticket: Ticket, result: Result<(), ConsoleError>) -> TaskDone {
        TaskDone::ChunkCommitted(ticket, result)
    }
    fn refresh_list(app: &mut App) {
        app.refresh_chunk_list();
    }
}

impl ConsoleFlow for SchemeFlow {
    fn view_mut(app: &mut App) -> &mut IngestView<Self> {
        &mut app.schemes
    }
    fn validated(ticket: Ticket, result: Validated<SchemeMetadata>) -> TaskDone {
        TaskDone::SchemeValidated(ticket, result)
    }
    fn committed(ticket: Ticket, result: Result<(), ConsoleError>) -> TaskDone {
        TaskDone::SchemeCommitted(ticket, result)
    }
    fn refresh_list(app: &mut App) {
        app.refresh_scheme_list();
    }
}

impl App {
    /// Run `fut` on the runtime; its value comes back through `drain_tasks`.
    pub(super) fn spawn<Fut>(&self, fut: Fut)
    where
        Fut: Future<Output = TaskDone> + Send + 'static,
    {
        let tx = self.tasks_tx.clone();
        self.runtime.spawn(async move {
            // The receiver only goes away when the console exits.
            let _ = tx.send(fut.await);
        });
    }

    pub(super) fn drain_tasks(&mut self) {
        while let Ok(done) = self.tasks_rx.try_recv() {
            self.apply_task(done);
        }
    }

    pub(super) fn apply_task(&mut self, done: TaskDone) {
        match done {
            TaskDone::ChunkValidated(ticket, result) => {
                self.apply_validation::<ChunkFlow>(ticket, result)
            }
            TaskDone::SchemeValidated(ticket, result) => {
                self.apply_validation::<SchemeFlow>(ticket, result)
            }
            TaskDone::ChunkCommitted(ticket, result) => {
                self.apply_commit::<ChunkFlow>(ticket, result)
            }
            TaskDone::SchemeCommitted(ticket, result) => {
                self.apply_commit::<SchemeFlow>(ticket, result)
            }
            TaskDone::Activated(kind, result) => self.apply_activation(kind, result),
            TaskDone::ChunkList(result) => match result {
                Ok(list) => self
                    .chunks
                    .set_rows(list.iter().map(BrowseRow::from).collect(), now_ts()),
                Err(err) => self.chunks.list_error = Some(err.to_string()),
            },
            TaskDone::SchemeList(result) => match result {
                Ok(list) => self
                    .schemes
                    .set_rows(list.iter().map(BrowseRow::from).collect(), now_ts()),
                Err(err) => self.schemes.list_error = Some(err.to_string()),
            },
            TaskDone::CurrentScheme(result) => match result {
                Ok(summary) => self.schemes.current = Some(summary),
                Err(err) => tracing::warn!(error = %err, "current scheme lookup failed"),
            },
            TaskDone::TargetAction {
                mode,
                label,
                target,
                result,
            } => {
                match result {
                    Ok(true) => self.push_output(vec![format!("{} {}: done", label, target)]),
                    Ok(false) => self.push_error(format!(
                        "{} {}: backend did not acknowledge this target",
                        label, target
                    )),
                    Err(err) => self.push_error(err.to_string()),
                }
                match mode {
                    UiMode::Chunks => self.refresh_chunk_list(),
                    UiMode::Schemes => self.refresh_scheme_list(),
                    _ => {}
                }
            }
            TaskDone::Preview { target, result } => match result {
                Ok(text) => {
                    let lines = text.lines().map(str::to_string).collect();
                    self.open_viewer(format!("Chunk {}", target), lines);
                }
                Err(err) => self.push_error(err.to_string()),
            },
            TaskDone::ServiceDetail { id, result } => self.apply_service_detail(id, result),
            TaskDone::ServiceIngest { id, result } => {
                match result {
                    Ok(ack) if ack.success => self.push_output(vec![format!(
                        "service {}: {}",
                        id,
                        ack.message.as_deref().unwrap_or("data accepted")
                    )]),
                    Ok(ack) => self.push_error(format!(
                        "service {}: {}",
                        id,
                        ack.message.as_deref().unwrap_or("data rejected")
                    )),
                    Err(err) => self.push_error(err.to_string()),
                }
                self.services_poll.trigger_now(Instant::now());
            }
            TaskDone::Export { path, result } => match result {
                Ok(bytes) => match std::fs::write(&path, &bytes) {
                    Ok(()) => self.push_output(vec![format!(
                        "{} bytes written to {}",
                        bytes.len(),
                        path.display()
                    )]),
                    Err(err) => self.push_error(format!("{}: {}", path.display(), err)),
                },
                Err(err) => self.push_error(err.to_string()),
            },
            TaskDone::Update(result) => {
                let state = self.update.record(result).clone();
                self.system.update = Some(state);
            }
        }
    }

    fn apply_validation<F: ConsoleFlow>(
        &mut self,
        ticket: Ticket,
        result: Validated<F::Metadata>,
    ) {
        let wizard = &mut F::view_mut(self).wizard;
        let Completion::Applied(step) = wizard.complete_validation(ticket, result) else {
            return;
        };
        if step == WizardStep::Staged {
            let hint = if wizard.selected_target().is_some() {
                "`activate` to load it"
            } else {
                "`commit` to save it"
            };
            self.push_output(vec![format!("{} staged; {}", F::NAME, hint)]);
        } else {
            let lines = wizard
                .failure()
                .map(ConsoleError::detail_lines)
                .unwrap_or_default();
            self.push_error_lines(lines);
        }
    }

    fn apply_commit<F: ConsoleFlow>(&mut self, ticket: Ticket, result: Result<(), ConsoleError>) {
        let wizard = &mut F::view_mut(self).wizard;
        let Completion::Applied(step) = wizard.complete_commit(ticket, result) else {
            return;
        };
        if step == WizardStep::Committed {
            self.push_output(vec![format!("{} saved", F::NAME)]);
            F::refresh_list(self);
        } else {
            let msg = wizard
                .failure()
                .map(ToString::to_string)
                .unwrap_or_else(|| "commit failed".to_string());
            self.push_error(format!("{}; upload the file again", msg));
        }
    }

    fn apply_activation(
        &mut self,
        kind: ActivationKind,
        result: Result<ActivationReport, ConsoleError>,
    ) {
        match result {
            Ok(report) => {
                let lines = report.lines();
                if report.succeeded() {
                    self.push_output(vec![format!("{}: complete", kind.as_str())]);
                } else {
                    self.push_error(format!(
                        "{}: {} of {} sub-action(s) failed",
                        kind.as_str(),
                        report.failures(),
                        report.results.len()
                    ));
                }
                self.schemes.activation = lines;
            }
            Err(err) => {
                self.schemes.activation = err.detail_lines();
                self.push_error(err.to_string());
            }
        }
        self.refresh_scheme_list();
    }

    fn apply_service_detail(&mut self, id: EntryId, result: Result<ServiceInfo, ConsoleError>) {
        let Some(detail) = self.services.detail.as_mut() else {
            return;
        };
        if detail.id != id || !matches!(detail.state, DetailState::Loading) {
            return;
        }
        match result {
            Ok(info) if info.name.is_some() => detail.state = DetailState::Loaded(Box::new(info)),
            Ok(_) => detail.state = DetailState::Failed("unknown service".to_string()),
            Err(err) if err.is_transport() => self.reset_session(err),
            Err(err) => detail.state = DetailState::Failed(err.to_string()),
        }
    }
}
