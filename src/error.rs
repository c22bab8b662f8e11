//! Error taxonomy shared by the polling engine, the ingestion protocol and the
//! backend client.

/// Errors produced by the console core.
///
/// Transport-level classes (`NetworkTimeout`, `NetworkFailure`,
/// `MalformedResponse`) are interchangeable from a caller's point of view: a
/// body that does not parse is handled exactly like a dropped connection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    /// The request did not complete within its per-call budget.
    #[error("{op}: request timed out")]
    NetworkTimeout { op: String },
    /// Connection failure or non-success HTTP status.
    #[error("{op}: {detail}")]
    NetworkFailure { op: String, detail: String },
    /// The backend answered, but not with the shape this client expects.
    #[error("{op}: malformed response ({detail})")]
    MalformedResponse { op: String, detail: String },
    /// Content-level rejection of an uploaded artifact.
    #[error("validation rejected ({} error(s))", errors.len())]
    ValidationRejected { errors: Vec<String> },
    /// The backend no longer accepts the fingerprint echoed at commit time.
    #[error("commit rejected: {message}")]
    StaleFingerprint { message: String },
    /// Commit attempted while nothing is staged.
    #[error("nothing staged to commit")]
    NoStagedArtifact,
    /// Client-side precondition failed before any request was issued.
    #[error("{reason}")]
    InvalidInput { reason: String },
}

impl ConsoleError {
    pub fn timeout(op: impl Into<String>) -> Self {
        ConsoleError::NetworkTimeout { op: op.into() }
    }

    pub fn network(op: impl Into<String>, detail: impl ToString) -> Self {
        ConsoleError::NetworkFailure {
            op: op.into(),
            detail: detail.to_string(),
        }
    }

    pub fn malformed(op: impl Into<String>, detail: impl ToString) -> Self {
        ConsoleError::MalformedResponse {
            op: op.into(),
            detail: detail.to_string(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        ConsoleError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// True for the classes a status poll recovers from locally.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ConsoleError::NetworkTimeout { .. }
                | ConsoleError::NetworkFailure { .. }
                | ConsoleError::MalformedResponse { .. }
        )
    }

    /// Lines suitable for an itemized error display.
    pub fn detail_lines(&self) -> Vec<String> {
        match self {
            ConsoleError::ValidationRejected { errors } => {
                let mut lines = vec![self.to_string()];
                lines.extend(errors.iter().map(|e| format!("- {}", e)));
                lines
            }
            other => vec![other.to_string()],
        }
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
