//! Run one wizard step end to end against the backend.
//!
//! The interactive console splits these into a spawned request and a later
//! `complete_*` on the UI thread; the command-line front end simply awaits.

use super::activation::{ActivationKind, ActivationOptions, ActivationReport};
use super::flow::IngestFlow;
use super::wizard::{IngestionWizard, WizardStep};
use crate::error::ConsoleError;
use crate::remote::{BackendClient, UploadFile};

pub async fn upload<F: IngestFlow>(
    client: &BackendClient,
    wizard: &mut IngestionWizard<F>,
    file: &UploadFile,
) -> Result<WizardStep, ConsoleError> {
    let ticket = wizard.begin_upload(&file.name)?;
    let result = client.validate::<F>(file).await;
    wizard.complete_validation(ticket, result);
    Ok(wizard.step())
}

pub async fn stage_existing<F: IngestFlow>(
    client: &BackendClient,
    wizard: &mut IngestionWizard<F>,
    target: &str,
) -> Result<WizardStep, ConsoleError> {
    let ticket = wizard.begin_stage_existing(target)?;
    let result = client.stage_existing::<F>(target).await;
    wizard.complete_validation(ticket, result);
    Ok(wizard.step())
}

pub async fn commit<F: IngestFlow>(
    client: &BackendClient,
    wizard: &mut IngestionWizard<F>,
    input: F::CommitInput,
) -> Result<WizardStep, ConsoleError> {
    let req = wizard.begin_commit(input)?;
    let result = client.commit::<F>(&req).await;
    wizard.complete_commit(req.ticket, result);
    Ok(wizard.step())
}

/// Load the committed (or freshly staged archived) scheme.
pub async fn activate<F: IngestFlow>(
    client: &BackendClient,
    wizard: &IngestionWizard<F>,
    options: &ActivationOptions,
) -> Result<ActivationReport, ConsoleError> {
    let token = wizard.activation_token()?;
    let report = client
        .activate(ActivationKind::LoadScheme, options, Some(&token))
        .await?;
    if report.succeeded() {
        tracing::info!(flow = F::NAME, "activation complete");
    } else {
        tracing::warn!(
            flow = F::NAME,
            failures = report.failures(),
            "activation reported failures"
        );
    }
    Ok(report)
}
