//! Error type shared by every stage of an ingest run.
//!
//! Each variant maps to a process exit code so `main` can stay a one-liner:
//!
//! - `2` invalid configuration
//! - `3` series file could not be read or written
//! - `4` the status page could not be fetched

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Transport failure, timeout, or a response status outside `[200, 300)`.
    #[error("Fetch of {url} failed: {reason}")]
    Fetch {
        url: String,
        /// HTTP status when a response was received at all.
        status: Option<u16>,
        reason: String,
    },

    /// The persisted series is missing, unreadable, or not valid JSON.
    #[error("Failed to read series '{}': {reason}", .path.display())]
    StorageRead { path: PathBuf, reason: String },

    /// The merged series could not be written; the previous file is untouched.
    #[error("Failed to write series '{}': {reason}", .path.display())]
    StorageWrite { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl IngestError {
    pub fn exit_code(&self) -> u8 {
        match self {
            IngestError::Config(_) => 2,
            IngestError::StorageRead { .. } | IngestError::StorageWrite { .. } => 3,
            IngestError::Fetch { .. } => 4,
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        IngestError::StorageRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        IngestError::StorageWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_failure_stage() {
        let fetch = IngestError::Fetch {
            url: "https://example.test/".to_string(),
            status: Some(503),
            reason: "HTTP 503 Service Unavailable".to_string(),
        };
        assert_eq!(fetch.exit_code(), 4);
        assert_eq!(IngestError::read("data/sf.json", "missing").exit_code(), 3);
        assert_eq!(IngestError::write("data/sf.json", "disk full").exit_code(), 3);
        assert_eq!(IngestError::Config("bad zone".to_string()).exit_code(), 2);
    }

    #[test]
    fn storage_errors_name_the_path() {
        let err = IngestError::read("data/sf.json", "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "Failed to read series 'data/sf.json': expected value at line 1 column 1"
        );
    }
}
