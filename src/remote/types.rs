//! Request-side payloads for the backend API.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::error::ConsoleError;

/// A user-selected file, read into memory for a multipart upload.
#[derive(Clone, Debug)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn read(path: &Path) -> Result<Self, ConsoleError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ConsoleError::invalid(format!("not a file: {}", path.display())))?
            .to_string();
        let bytes = std::fs::read(path)
            .map_err(|e| ConsoleError::invalid(format!("read {}: {}", path.display(), e)))?;
        Ok(Self { name, bytes })
    }

    pub(super) fn part(&self) -> Part {
        Part::bytes(self.bytes.clone()).file_name(self.name.clone())
    }

    pub(super) fn form(&self) -> Form {
        Form::new().part("file", self.part())
    }
}

pub(super) fn flag(v: bool) -> String {
    if v { "1" } else { "0" }.to_string()
}
