//! Multipart intake and the toy "validation" the stub performs on uploads.
//!
//! Uploaded files are treated as text. A line starting with `error:` is a
//! content error; `key: value` lines provide metadata.

use super::*;

pub(super) struct Upload {
    pub(super) file_name: String,
    pub(super) bytes: Vec<u8>,
    pub(super) fields: HashMap<String, String>,
}

pub(super) struct UploadBatch {
    pub(super) files: Vec<(String, Vec<u8>)>,
    pub(super) fields: HashMap<String, String>,
}

pub(super) async fn read_multipart(mut multipart: Multipart) -> Result<UploadBatch, Response> {
    let mut files = Vec::new();
    let mut fields = HashMap::new();
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.map_err(bad_request)?;
                files.push((file_name, bytes.to_vec()));
            }
            None => {
                let value = field.text().await.map_err(bad_request)?;
                fields.insert(name, value);
            }
        }
    }
    Ok(UploadBatch { files, fields })
}

/// Exactly one file plus any text fields.
pub(super) async fn read_single(multipart: Multipart) -> Result<Upload, Response> {
    let UploadBatch { mut files, fields } = read_multipart(multipart).await?;
    if files.len() != 1 {
        return Err(bad_request(format!("expected one file, got {}", files.len())));
    }
    let (file_name, bytes) = files.remove(0);
    Ok(Upload {
        file_name,
        bytes,
        fields,
    })
}

pub(super) fn content_errors(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .filter_map(|l| l.trim().strip_prefix("error:"))
        .map(|e| e.trim().to_string())
        .collect()
}

pub(super) fn content_field(bytes: &[u8], key: &str) -> Option<String> {
    let prefix = format!("{}:", key);
    String::from_utf8_lossy(bytes)
        .lines()
        .find_map(|l| l.trim().strip_prefix(prefix.as_str()).map(|v| v.trim().to_string()))
}

pub(super) fn content_count(bytes: &[u8], key: &str) -> usize {
    let prefix = format!("{}:", key);
    String::from_utf8_lossy(bytes)
        .lines()
        .filter(|l| l.trim().starts_with(prefix.as_str()))
        .count()
}

pub(super) fn file_stem(name: &str) -> String {
    std::path::Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
        .to_string()
}

/// Content hash in the shape the console expects of an md5 field.
pub(super) fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex()[..32].to_string()
}
