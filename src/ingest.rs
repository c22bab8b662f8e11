//! Two-phase content ingestion: upload for validation, then commit by
//! echoing the fingerprint the backend handed out.

mod activation;
mod drive;
mod fingerprint;
mod flow;
mod wizard;

pub use self::activation::{ActivationKind, ActivationOptions, ActivationReport};
pub use self::drive::{activate, commit, stage_existing, upload};
pub use self::fingerprint::{Fingerprint, FingerprintGuard, StagedArtifact};
pub use self::flow::{
    ChunkFlow, ChunkMetadata, IngestFlow, SchemeCommit, SchemeFlow, SchemeMetadata,
    ValidationOutcome,
};
pub use self::wizard::{CommitRequest, Completion, IngestionWizard, Ticket, WizardStep};
