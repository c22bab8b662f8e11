//! Opaque staging tokens and the guard that holds the current one.

use std::fmt;

use crate::error::ConsoleError;

/// Token proving a commit targets the artifact most recently validated.
///
/// Depending on the flow the backend derives it from a content hash or from a
/// modification time; either way it is compared for equality only.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(token: impl Into<String>) -> Self {
        Fingerprint(token.into())
    }

    /// Raw token, for echoing back to the backend.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.0)
    }
}

/// A validated artifact awaiting confirmation.
#[derive(Clone, Debug, PartialEq)]
pub struct StagedArtifact<M> {
    pub fingerprint: Fingerprint,
    pub metadata: M,
}

/// Holds at most one staged artifact. Attaching replaces the previous one
/// unconditionally; there is no way back to an older token.
#[derive(Debug)]
pub struct FingerprintGuard<M> {
    staged: Option<StagedArtifact<M>>,
}

impl<M> Default for FingerprintGuard<M> {
    fn default() -> Self {
        Self { staged: None }
    }
}

impl<M> FingerprintGuard<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, metadata: M, fingerprint: Fingerprint) {
        self.staged = Some(StagedArtifact {
            fingerprint,
            metadata,
        });
    }

    pub fn commit_token(&self) -> Result<&Fingerprint, ConsoleError> {
        self.staged
            .as_ref()
            .map(|s| &s.fingerprint)
            .ok_or(ConsoleError::NoStagedArtifact)
    }

    pub fn staged(&self) -> Option<&StagedArtifact<M>> {
        self.staged.as_ref()
    }

    pub fn clear(&mut self) {
        self.staged = None;
    }
}

#[cfg(test)]
#[path = "../tests/ingest/fingerprint_tests.rs"]
mod tests;
