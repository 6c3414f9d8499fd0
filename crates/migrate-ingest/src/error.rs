//! Error types for reading legacy exports.

use std::path::{Path, PathBuf};

use migrate_model::{ErrorKind, MigrationError};
use thiserror::Error;

/// Errors that can occur while locating or reading an input table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input directory missing or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither `<table>.json` nor `<table>.csv` exists.
    #[error("input not found: {path} (.json or .csv)")]
    InputNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unsupported input format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

impl IngestError {
    pub fn path(&self) -> &Path {
        match self {
            Self::DirectoryNotFound { path }
            | Self::DirectoryRead { path, .. }
            | Self::InputNotFound { path }
            | Self::FileRead { path, .. }
            | Self::UnsupportedEncoding { path, .. }
            | Self::JsonParse { path, .. }
            | Self::CsvParse { path, .. }
            | Self::UnsupportedFormat { path } => path,
        }
    }

    /// Taxonomy kind: missing inputs versus unreadable ones.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DirectoryNotFound { .. } | Self::InputNotFound { .. } => {
                ErrorKind::InputNotFound
            }
            Self::DirectoryRead { .. }
            | Self::FileRead { .. }
            | Self::UnsupportedEncoding { .. }
            | Self::JsonParse { .. }
            | Self::CsvParse { .. }
            | Self::UnsupportedFormat { .. } => ErrorKind::InputParseError,
        }
    }
}

impl From<IngestError> for MigrationError {
    fn from(err: IngestError) -> Self {
        let path = err.path().to_path_buf();
        match err.kind() {
            ErrorKind::InputNotFound => Self::InputNotFound { path },
            _ => Self::InputParseError {
                path,
                message: err.to_string(),
            },
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
