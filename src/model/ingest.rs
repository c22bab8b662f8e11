//! DTOs for the ingestion, browse and maintenance endpoints.

use serde::{Deserialize, Serialize};

use super::scalar::{Scalar, de_truthy};

/// Validate response of the chunk flow. `error` is absent when the backend
/// could not even attempt validation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChunkValidation {
    #[serde(default)]
    pub error: Option<Vec<String>>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub dst: String,
    #[serde(default)]
    pub size: Scalar,
    #[serde(default)]
    pub md5: Option<Scalar>,
}

/// Validate (and prepare) response of the scheme flow.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SchemeValidation {
    #[serde(default, rename = "errorList")]
    pub error_list: Option<Vec<String>>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub channel: Scalar,
    #[serde(default)]
    pub eit: Scalar,
    #[serde(default)]
    pub rule: Scalar,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mtime: Option<Scalar>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CommitAck {
    #[serde(default, deserialize_with = "de_truthy")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// One sub-action of a multi-object activation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionResult {
    #[serde(default, deserialize_with = "de_truthy")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Acknowledgement of a per-target action; `target` echoes the request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TargetAck {
    #[serde(default, deserialize_with = "de_truthy")]
    pub success: bool,
    #[serde(default)]
    pub target: Scalar,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChunkListing {
    pub target: Scalar,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub meta: Option<ChunkListingMeta>,
    #[serde(default)]
    pub pid: Scalar,
    #[serde(default, deserialize_with = "de_truthy")]
    pub playing: bool,
    /// Source is retained, so the chunk can be paused, resumed or downloaded.
    #[serde(default, deserialize_with = "de_truthy")]
    pub ets: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChunkListingMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub dst: String,
}

impl ChunkListing {
    pub fn title(&self) -> &str {
        self.meta.as_ref().map(|m| m.title.as_str()).unwrap_or("?")
    }

    pub fn destination(&self) -> &str {
        self.meta.as_ref().map(|m| m.dst.as_str()).unwrap_or("?")
    }

    pub fn can_play(&self) -> bool {
        self.ets && !self.playing
    }

    pub fn can_pause(&self) -> bool {
        self.ets && self.playing
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SchemeListing {
    pub target: Scalar,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel: Scalar,
    #[serde(default)]
    pub eit: Scalar,
    #[serde(default)]
    pub rule: Scalar,
    #[serde(default)]
    pub source: String,
}

/// The scheme currently loaded on the backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SchemeSummary {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub channel: Scalar,
    #[serde(default)]
    pub eit: Scalar,
    #[serde(default)]
    pub rule: Scalar,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MaintenanceResult {
    #[serde(default, deserialize_with = "de_truthy")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub pod: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateCheck {
    #[serde(default)]
    pub success: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default, deserialize_with = "de_truthy")]
    pub success: bool,
    #[serde(default)]
    pub announce: Option<AnnouncementSet>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnnouncementSet {
    pub present: AnnouncementSlot,
    pub following: AnnouncementSlot,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementSlot {
    #[serde(default, deserialize_with = "de_truthy")]
    pub publish: bool,
    #[serde(default)]
    pub text: String,
}
