pub mod export;

use std::fs;
use std::path::{Path, PathBuf};

use crate::io::export::ExportedDocument;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a clipboard dump (rich markup or plain text) from disk
pub fn read_clipboard_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Serialise an exported document as indented JSON
pub fn to_json_pretty(exported: &ExportedDocument) -> Result<String, IoError> {
    Ok(serde_json::to_string_pretty(exported)?)
}

/// Write an exported document to `path` as indented JSON
pub fn write_export(path: &Path, exported: &ExportedDocument) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, to_json_pretty(exported)?).map_err(IoError::Io)
}

/// File name for an export taken at `time` (epoch milliseconds)
pub fn export_file_name(time: u64) -> String {
    format!("article-{time}.json")
}
