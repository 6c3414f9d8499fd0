//! Output error types.

use std::path::{Path, PathBuf};

use migrate_model::MigrationError;
use thiserror::Error;

/// Failure to produce one output file.
#[derive(Debug, Error)]
pub enum OutputError {
    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The temp file was written but could not replace the target.
    #[error("failed to move {temp_path} to {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OutputError {
    /// The output file (or directory) that was being produced.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Serialize { path, .. } => path,
            Self::AtomicWriteFailed { target_path, .. } => target_path,
        }
    }
}

impl From<OutputError> for MigrationError {
    fn from(err: OutputError) -> Self {
        Self::WriteFailure {
            path: err.path().to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
