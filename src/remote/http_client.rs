use reqwest::multipart::Form;

use super::*;

/// Classify a transport error from reqwest.
pub(super) fn map_send_error(op: &str, err: reqwest::Error) -> ConsoleError {
    if err.is_timeout() {
        ConsoleError::timeout(op)
    } else if err.is_decode() {
        ConsoleError::malformed(op, err)
    } else {
        ConsoleError::network(op, err)
    }
}

impl BackendClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_body(&self, op: &str, resp: reqwest::Response) -> Result<Vec<u8>, ConsoleError> {
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(op, %status, "backend returned error status");
            return Err(ConsoleError::network(op, format!("HTTP {}", status)));
        }
        let bytes = resp.bytes().await.map_err(|e| map_send_error(op, e))?;
        Ok(bytes.to_vec())
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        op: &str,
        resp: reqwest::Response,
    ) -> Result<T, ConsoleError> {
        let bytes = self.read_body(op, resp).await?;
        serde_json::from_slice(&bytes).map_err(|e| ConsoleError::malformed(op, e))
    }

    pub(super) async fn post_form<T: DeserializeOwned>(
        &self,
        op: &str,
        path: &str,
        form: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T, ConsoleError> {
        tracing::debug!(op, path, "POST form");
        let resp = self
            .client
            .post(self.url(path))
            .form(form)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_send_error(op, e))?;
        self.decode(op, resp).await
    }

    pub(super) async fn post_multipart<T: DeserializeOwned>(
        &self,
        op: &str,
        path: &str,
        form: Form,
        timeout: Duration,
    ) -> Result<T, ConsoleError> {
        tracing::debug!(op, path, "POST multipart");
        let resp = self
            .client
            .post(self.url(path))
            .multipart(form)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_send_error(op, e))?;
        self.decode(op, resp).await
    }

    pub(super) async fn get_bytes(
        &self,
        op: &str,
        path: &str,
        timeout: Duration,
    ) -> Result<Vec<u8>, ConsoleError> {
        tracing::debug!(op, path, "GET");
        let resp = self
            .client
            .get(self.url(path))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_send_error(op, e))?;
        self.read_body(op, resp).await
    }
}
