use super::*;
use crate::ingest::{
    ActivationKind, ActivationOptions, ActivationReport, CommitRequest, Fingerprint, IngestFlow,
    ValidationOutcome,
};
use crate::model::{ActionResult, CommitAck};

impl BackendClient {
    /// Upload a file for validation by the flow's backend endpoint.
    pub async fn validate<F: IngestFlow>(
        &self,
        file: &UploadFile,
    ) -> Result<ValidationOutcome<F::Metadata>, ConsoleError> {
        let op = format!("validate {}", F::NAME);
        let resp: F::Response = self
            .post_multipart(&op, F::UPLOAD_PATH, file.form(), self.timeouts.upload())
            .await?;
        F::interpret(resp)
    }

    /// Re-validate an object the backend already archives.
    pub async fn stage_existing<F: IngestFlow>(
        &self,
        target: &str,
    ) -> Result<ValidationOutcome<F::Metadata>, ConsoleError> {
        let Some(path) = F::PREPARE_PATH else {
            return Err(ConsoleError::invalid(format!(
                "{} flow cannot stage archived objects",
                F::NAME
            )));
        };
        let op = format!("prepare {}", F::NAME);
        let resp: F::Response = self
            .post_form(&op, path, &[("target", target.to_string())], self.timeouts.browse())
            .await?;
        F::interpret(resp)
    }

    /// Echo the staged fingerprint back. A refusal means the backend no longer
    /// considers that validation current.
    pub async fn commit<F: IngestFlow>(
        &self,
        req: &CommitRequest<F::CommitInput>,
    ) -> Result<(), ConsoleError> {
        let op = format!("commit {}", F::NAME);
        let form = F::commit_form(&req.fingerprint, &req.input);
        let ack: CommitAck = self
            .post_form(&op, F::COMMIT_PATH, &form, self.timeouts.commit())
            .await?;
        if ack.success {
            Ok(())
        } else {
            Err(ConsoleError::StaleFingerprint {
                message: ack
                    .message
                    .unwrap_or_else(|| "backend refused the staged artifact".to_string()),
            })
        }
    }

    pub async fn activate(
        &self,
        kind: ActivationKind,
        options: &ActivationOptions,
        fingerprint: Option<&Fingerprint>,
    ) -> Result<ActivationReport, ConsoleError> {
        let mut form = options.form_fields();
        form.push(("action", kind.as_str().to_string()));
        form.push((
            "mtime",
            fingerprint.map(|f| f.as_str().to_string()).unwrap_or_default(),
        ));
        let value: serde_json::Value = self
            .post_form("scheme action", "/scheme/action", &form, self.timeouts.activate())
            .await?;
        ActivationReport::from_value(value)
    }

    /// Upload several chunk files and commit them in one step.
    pub async fn upload_and_save(
        &self,
        files: &[UploadFile],
    ) -> Result<Vec<ActionResult>, ConsoleError> {
        let form = files
            .iter()
            .fold(reqwest::multipart::Form::new(), |form, f| form.part("file", f.part()));
        self.post_multipart("upload and save", "/carousel/upnsave", form, self.timeouts.upload())
            .await
    }
}
