//! Upload → validate → confirm → commit state machine.
//!
//! The wizard never performs I/O itself. Every network step is split into a
//! `begin_*` call that hands out a [`Ticket`] and a `complete_*` call that
//! applies the response. Responses arriving for a ticket that is no longer
//! current (the user restarted, re-uploaded or reset in the meantime) are
//! dropped, so nothing is acted upon after the session it belonged to is gone.

use std::marker::PhantomData;

use super::fingerprint::{Fingerprint, FingerprintGuard, StagedArtifact};
use super::flow::{IngestFlow, ValidationOutcome};
use crate::error::ConsoleError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    Idle,
    Uploading,
    Staged,
    Committing,
    Committed,
    Failed,
}

impl WizardStep {
    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Idle => "idle",
            WizardStep::Uploading => "uploading",
            WizardStep::Staged => "staged",
            WizardStep::Committing => "committing",
            WizardStep::Committed => "committed",
            WizardStep::Failed => "failed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Validate,
    Commit,
}

/// Identifies one outstanding request of one wizard session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
    phase: Phase,
}

/// Everything needed to issue a commit request.
#[derive(Clone, Debug)]
pub struct CommitRequest<I> {
    pub ticket: Ticket,
    pub fingerprint: Fingerprint,
    pub input: I,
}

/// Whether a completion was applied to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied(WizardStep),
    Superseded,
}

pub struct IngestionWizard<F: IngestFlow> {
    step: WizardStep,
    epoch: u64,
    guard: FingerprintGuard<F::Metadata>,
    /// Metadata of the last validation, kept for display even when rejected.
    report: Option<F::Metadata>,
    failure: Option<ConsoleError>,
    selected_target: Option<String>,
    file_name: Option<String>,
    _flow: PhantomData<F>,
}

impl<F: IngestFlow> Default for IngestionWizard<F> {
    fn default() -> Self {
        Self {
            step: WizardStep::Idle,
            epoch: 0,
            guard: FingerprintGuard::new(),
            report: None,
            failure: None,
            selected_target: None,
            file_name: None,
            _flow: PhantomData,
        }
    }
}

impl<F: IngestFlow> IngestionWizard<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn failure(&self) -> Option<&ConsoleError> {
        self.failure.as_ref()
    }

    pub fn staged(&self) -> Option<&StagedArtifact<F::Metadata>> {
        self.guard.staged()
    }

    pub fn report(&self) -> Option<&F::Metadata> {
        self.report.as_ref()
    }

    pub fn selected_target(&self) -> Option<&str> {
        self.selected_target.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Back to idle. Any outstanding response is ignored when it arrives.
    pub fn reset(&mut self) {
        *self = Self {
            epoch: self.epoch + 1,
            ..Self::default()
        };
    }

    /// Start validating a freshly selected file.
    ///
    /// Allowed from idle, failed (retry) and staged (a new validation
    /// supersedes the staged artifact). A committed session must be reset
    /// first.
    pub fn begin_upload(&mut self, file_name: &str) -> Result<Ticket, ConsoleError> {
        if !F::accepts(file_name) {
            return Err(ConsoleError::invalid(format!(
                "only .{} files are accepted",
                F::FILE_EXTENSION
            )));
        }
        self.ensure_can_validate()?;
        let ticket = self.enter_uploading();
        self.file_name = Some(file_name.to_string());
        Ok(ticket)
    }

    /// Start re-validating an object the backend already holds.
    pub fn begin_stage_existing(&mut self, target: &str) -> Result<Ticket, ConsoleError> {
        if F::PREPARE_PATH.is_none() {
            return Err(ConsoleError::invalid(format!(
                "{} flow cannot stage archived objects",
                F::NAME
            )));
        }
        self.ensure_can_validate()?;
        let ticket = self.enter_uploading();
        self.selected_target = Some(target.to_string());
        Ok(ticket)
    }

    fn ensure_can_validate(&self) -> Result<(), ConsoleError> {
        match self.step {
            WizardStep::Committing => Err(ConsoleError::invalid("commit in progress")),
            WizardStep::Committed => Err(ConsoleError::invalid(
                "session already committed; start a new one",
            )),
            _ => Ok(()),
        }
    }

    fn enter_uploading(&mut self) -> Ticket {
        self.epoch += 1;
        self.step = WizardStep::Uploading;
        self.guard.clear();
        self.report = None;
        self.failure = None;
        self.selected_target = None;
        self.file_name = None;
        Ticket {
            epoch: self.epoch,
            phase: Phase::Validate,
        }
    }

    fn is_current(&self, ticket: Ticket, phase: Phase, step: WizardStep) -> bool {
        ticket.epoch == self.epoch && ticket.phase == phase && self.step == step
    }

    pub fn complete_validation(
        &mut self,
        ticket: Ticket,
        result: Result<ValidationOutcome<F::Metadata>, ConsoleError>,
    ) -> Completion {
        if !self.is_current(ticket, Phase::Validate, WizardStep::Uploading) {
            tracing::debug!(flow = F::NAME, "dropping superseded validation response");
            return Completion::Superseded;
        }

        match result {
            Ok(outcome) => {
                self.report = Some(outcome.metadata.clone());
                if !outcome.errors.is_empty() {
                    self.fail(ConsoleError::ValidationRejected {
                        errors: outcome.errors,
                    });
                } else if let Some(fp) = outcome.fingerprint {
                    tracing::info!(flow = F::NAME, fingerprint = fp.as_str(), "artifact staged");
                    self.guard.attach(outcome.metadata, fp);
                    self.step = WizardStep::Staged;
                } else {
                    self.fail(ConsoleError::malformed(
                        format!("validate {}", F::NAME),
                        "valid artifact without fingerprint",
                    ));
                }
            }
            Err(err) => self.fail(err),
        }
        Completion::Applied(self.step)
    }

    /// Confirm the staged artifact. The request carries the fingerprint held
    /// right now; whether the backend still accepts it is decided there.
    pub fn begin_commit(
        &mut self,
        input: F::CommitInput,
    ) -> Result<CommitRequest<F::CommitInput>, ConsoleError> {
        let fingerprint = self.guard.commit_token()?.clone();
        if self.step != WizardStep::Staged {
            return Err(ConsoleError::invalid(format!(
                "cannot commit while {}",
                self.step.label()
            )));
        }
        F::check_commit(&input)?;
        self.step = WizardStep::Committing;
        Ok(CommitRequest {
            ticket: Ticket {
                epoch: self.epoch,
                phase: Phase::Commit,
            },
            fingerprint,
            input,
        })
    }

    pub fn complete_commit(
        &mut self,
        ticket: Ticket,
        result: Result<(), ConsoleError>,
    ) -> Completion {
        if !self.is_current(ticket, Phase::Commit, WizardStep::Committing) {
            tracing::debug!(flow = F::NAME, "dropping superseded commit response");
            return Completion::Superseded;
        }
        match result {
            Ok(()) => {
                tracing::info!(flow = F::NAME, "artifact committed");
                self.step = WizardStep::Committed;
            }
            Err(err) => {
                // A rejected commit must be restarted from validation.
                self.guard.clear();
                self.fail(err);
            }
        }
        Completion::Applied(self.step)
    }

    /// Token for post-commit actions: available once committed, or right
    /// after staging an archived object.
    pub fn activation_token(&self) -> Result<Fingerprint, ConsoleError> {
        let token = self.guard.commit_token()?.clone();
        match (self.step, &self.selected_target) {
            (WizardStep::Committed, _) | (WizardStep::Staged, Some(_)) => Ok(token),
            (step, _) => Err(ConsoleError::invalid(format!(
                "cannot activate while {}",
                step.label()
            ))),
        }
    }

    fn fail(&mut self, err: ConsoleError) {
        tracing::warn!(flow = F::NAME, error = %err, "ingestion step failed");
        self.failure = Some(err);
        self.step = WizardStep::Failed;
    }

    /// Human-readable state, one line per item.
    pub fn status_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{} wizard: {}", F::NAME, self.step.label())];
        if let Some(name) = &self.file_name {
            lines.push(format!("file: {}", name));
        }
        if let Some(target) = &self.selected_target {
            lines.push(format!("archived target: {}", target));
        }
        if let Some(meta) = &self.report {
            lines.extend(F::summary_lines(meta));
        }
        if let Some(staged) = self.guard.staged() {
            lines.push(format!("fingerprint: {}", staged.fingerprint.as_str()));
        }
        if let Some(err) = &self.failure {
            lines.extend(err.detail_lines());
        }
        lines
    }
}

#[cfg(test)]
#[path = "../tests/ingest/wizard_tests.rs"]
mod tests;
