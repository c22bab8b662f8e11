use super::*;
use crate::model::{ChunkListing, SchemeListing, SchemeSummary, TargetAck};

const NO_FIELDS: &[(&str, String)] = &[];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkAction {
    Delete,
    Play,
    Pause,
}

impl ChunkAction {
    fn path(self) -> &'static str {
        match self {
            ChunkAction::Delete => "/carousel/delete",
            ChunkAction::Play => "/carousel/play",
            ChunkAction::Pause => "/carousel/pause",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChunkAction::Delete => "delete",
            ChunkAction::Play => "play",
            ChunkAction::Pause => "pause",
        }
    }
}

impl BackendClient {
    pub async fn list_chunks(&self) -> Result<Vec<ChunkListing>, ConsoleError> {
        self.post_form("browse chunks", "/carousel/browse", NO_FIELDS, self.timeouts.browse())
            .await
    }

    pub async fn list_schemes(&self) -> Result<Vec<SchemeListing>, ConsoleError> {
        self.post_form("browse schemes", "/scheme/browse", NO_FIELDS, self.timeouts.browse())
            .await
    }

    pub async fn current_scheme(&self) -> Result<SchemeSummary, ConsoleError> {
        self.post_form("current scheme", "/scheme", NO_FIELDS, self.timeouts.browse())
            .await
    }

    /// Returns whether the backend acknowledged the action for this target.
    pub async fn chunk_action(
        &self,
        action: ChunkAction,
        target: &str,
    ) -> Result<bool, ConsoleError> {
        let op = format!("chunk {}", action.label());
        let ack: TargetAck = self
            .post_form(
                &op,
                action.path(),
                &[("target", target.to_string())],
                self.timeouts.target(),
            )
            .await?;
        Ok(acknowledged(&ack, target))
    }

    pub async fn delete_scheme(&self, target: &str) -> Result<bool, ConsoleError> {
        let ack: TargetAck = self
            .post_form(
                "scheme delete",
                "/scheme/delete",
                &[("target", target.to_string())],
                self.timeouts.target(),
            )
            .await?;
        Ok(acknowledged(&ack, target))
    }

    /// Decoded text dump of a carousel chunk.
    pub async fn preview_chunk(&self, target: &str) -> Result<String, ConsoleError> {
        let bytes = self
            .get_bytes("chunk preview", &format!("/dump/{}", target), self.timeouts.target())
            .await?;
        String::from_utf8(bytes).map_err(|e| ConsoleError::malformed("chunk preview", e))
    }

    pub async fn download_chunk(&self, target: &str) -> Result<Vec<u8>, ConsoleError> {
        self.get_bytes(
            "chunk download",
            &format!("/carousel/{}", target),
            self.timeouts.browse(),
        )
        .await
    }
}

/// An acknowledgement only counts for the target it echoes.
pub(super) fn acknowledged(ack: &TargetAck, target: &str) -> bool {
    ack.success && ack.target.as_str() == target
}

#[cfg(test)]
#[path = "../tests/remote/browse_tests.rs"]
mod tests;
