//! The two content-import flows, expressed as parameters of one wizard.

use std::fmt;

use serde::de::DeserializeOwned;

use super::fingerprint::Fingerprint;
use crate::error::ConsoleError;
use crate::model::{ChunkValidation, SchemeValidation};

const MIN_DESCRIPTION_LEN: usize = 5;

/// What a validate call reported, before the wizard decides what to do with it.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationOutcome<M> {
    pub metadata: M,
    pub errors: Vec<String>,
    pub fingerprint: Option<Fingerprint>,
}

/// Endpoint names and metadata schema of one ingestion flow.
pub trait IngestFlow {
    type Metadata: Clone + fmt::Debug + Send + Sync + 'static;
    type CommitInput: Clone + fmt::Debug + Send + Sync + 'static;
    type Response: DeserializeOwned + Send + 'static;

    const NAME: &'static str;
    const UPLOAD_PATH: &'static str;
    const COMMIT_PATH: &'static str;
    /// Endpoint that re-validates an already archived object, if the flow has one.
    const PREPARE_PATH: Option<&'static str>;
    const FILE_EXTENSION: &'static str;

    /// Map a validate response onto an outcome. A response lacking its error
    /// array is a transport-level failure, not a content-level one.
    fn interpret(resp: Self::Response) -> Result<ValidationOutcome<Self::Metadata>, ConsoleError>;

    fn check_commit(input: &Self::CommitInput) -> Result<(), ConsoleError>;

    fn commit_form(
        fingerprint: &Fingerprint,
        input: &Self::CommitInput,
    ) -> Vec<(&'static str, String)>;

    fn accepts(file_name: &str) -> bool {
        std::path::Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(Self::FILE_EXTENSION))
    }

    fn summary_lines(metadata: &Self::Metadata) -> Vec<String>;
}

/// Enhanced data chunks for the transport-stream carousel.
#[derive(Clone, Copy, Debug)]
pub struct ChunkFlow;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkMetadata {
    pub source: String,
    pub title: String,
    pub destination: String,
    pub size: String,
}

impl IngestFlow for ChunkFlow {
    type Metadata = ChunkMetadata;
    type CommitInput = ();
    type Response = ChunkValidation;

    const NAME: &'static str = "chunk";
    const UPLOAD_PATH: &'static str = "/carousel/upload";
    const COMMIT_PATH: &'static str = "/carousel/save";
    const PREPARE_PATH: Option<&'static str> = None;
    const FILE_EXTENSION: &'static str = "gz";

    fn interpret(resp: ChunkValidation) -> Result<ValidationOutcome<ChunkMetadata>, ConsoleError> {
        let Some(errors) = resp.error else {
            return Err(ConsoleError::malformed(
                "validate chunk",
                "missing error list",
            ));
        };
        Ok(ValidationOutcome {
            metadata: ChunkMetadata {
                source: resp.source,
                title: resp.title,
                destination: resp.dst,
                size: resp.size.0,
            },
            errors,
            fingerprint: resp
                .md5
                .filter(|m| !m.is_empty())
                .map(|m| Fingerprint::new(m.0)),
        })
    }

    fn check_commit(_input: &()) -> Result<(), ConsoleError> {
        Ok(())
    }

    fn commit_form(fingerprint: &Fingerprint, _input: &()) -> Vec<(&'static str, String)> {
        vec![("md5", fingerprint.as_str().to_string())]
    }

    fn summary_lines(m: &ChunkMetadata) -> Vec<String> {
        vec![
            format!("Source file: {}", m.source),
            format!("Title: {}", m.title),
            format!("Destination: {}", m.destination),
            format!("Size: {}", m.size),
        ]
    }
}

/// Scheduling schemes converted from spreadsheets.
#[derive(Clone, Copy, Debug)]
pub struct SchemeFlow;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemeMetadata {
    pub source: String,
    pub services: String,
    pub eit: String,
    pub rules: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemeCommit {
    pub description: String,
}

impl IngestFlow for SchemeFlow {
    type Metadata = SchemeMetadata;
    type CommitInput = SchemeCommit;
    type Response = SchemeValidation;

    const NAME: &'static str = "scheme";
    const UPLOAD_PATH: &'static str = "/scheme/upload";
    const COMMIT_PATH: &'static str = "/scheme/validate";
    const PREPARE_PATH: Option<&'static str> = Some("/scheme/prepare");
    const FILE_EXTENSION: &'static str = "xls";

    fn interpret(
        resp: SchemeValidation,
    ) -> Result<ValidationOutcome<SchemeMetadata>, ConsoleError> {
        let Some(errors) = resp.error_list else {
            return Err(ConsoleError::malformed(
                "validate scheme",
                "missing errorList",
            ));
        };
        Ok(ValidationOutcome {
            metadata: SchemeMetadata {
                source: resp.source,
                services: resp.channel.0,
                eit: resp.eit.0,
                rules: resp.rule.0,
                description: resp.description,
            },
            errors,
            fingerprint: resp
                .mtime
                .filter(|m| !m.is_empty())
                .map(|m| Fingerprint::new(m.0)),
        })
    }

    fn check_commit(input: &SchemeCommit) -> Result<(), ConsoleError> {
        let len = input.description.trim().chars().count();
        if len == 0 {
            return Err(ConsoleError::invalid(
                "short scheme description is required",
            ));
        }
        if len < MIN_DESCRIPTION_LEN {
            return Err(ConsoleError::invalid(format!(
                "description needs to have at least {} characters",
                MIN_DESCRIPTION_LEN
            )));
        }
        Ok(())
    }

    fn commit_form(
        fingerprint: &Fingerprint,
        input: &SchemeCommit,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("description", input.description.trim().to_string()),
            ("mtime", fingerprint.as_str().to_string()),
        ]
    }

    fn summary_lines(m: &SchemeMetadata) -> Vec<String> {
        vec![
            format!("Source file: {}", m.source),
            format!("Services: {}", m.services),
            format!("EIT: {}", m.eit),
            format!("Rules: {}", m.rules),
        ]
    }
}

#[cfg(test)]
#[path = "../tests/ingest/flow_tests.rs"]
mod tests;
