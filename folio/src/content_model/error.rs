//! Error types for content loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the JSON content files
#[derive(Error, Debug)]
pub enum ContentError {
    /// A content file required by a configured section does not exist
    #[error("Missing content file {path}", path = .0.display())]
    MissingFile(PathBuf),

    #[error("IO error reading {path}: {source}", path = .0.display(), source = .1)]
    IoError(PathBuf, #[source] std::io::Error),

    #[error("Invalid JSON in {path}: {source}", path = .0.display(), source = .1)]
    JsonError(PathBuf, #[source] serde_json::Error),

    /// A file that must hold at least one record is an empty array
    #[error("{path} must contain at least one record", path = .0.display())]
    MissingRecord(PathBuf),
}
