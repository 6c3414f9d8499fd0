use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Failure categories reported by the migration.
///
/// File-level kinds (`InputNotFound`, `InputParseError`) abort the dataset
/// group that needs the file. Field-level kinds degrade a single field.
/// `WriteFailure` is reported per output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ErrorKind {
    InputNotFound,
    InputParseError,
    InvalidDate,
    NumericCoercionFailure,
    WriteFailure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InputNotFound => "InputNotFound",
            Self::InputParseError => "InputParseError",
            Self::InvalidDate => "InvalidDate",
            Self::NumericCoercionFailure => "NumericCoercionFailure",
            Self::WriteFailure => "WriteFailure",
        }
    }

    /// True for kinds that only degrade one field of one record.
    pub fn is_field_level(self) -> bool {
        matches!(self, Self::InvalidDate | Self::NumericCoercionFailure)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure reported by the migration, carrying the file, field or value
/// involved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationError {
    #[error("input not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("failed to parse {path}: {message}")]
    InputParseError { path: PathBuf, message: String },

    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),

    #[error(transparent)]
    NumericCoercionFailure(#[from] NumericCoercionFailure),

    #[error("failed to write {path}: {message}")]
    WriteFailure { path: PathBuf, message: String },
}

impl MigrationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InputNotFound { .. } => ErrorKind::InputNotFound,
            Self::InputParseError { .. } => ErrorKind::InputParseError,
            Self::InvalidDate(_) => ErrorKind::InvalidDate,
            Self::NumericCoercionFailure(_) => ErrorKind::NumericCoercionFailure,
            Self::WriteFailure { .. } => ErrorKind::WriteFailure,
        }
    }

    /// The file involved, for file-level failures.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InputNotFound { path }
            | Self::InputParseError { path, .. }
            | Self::WriteFailure { path, .. } => Some(path.as_path()),
            Self::InvalidDate(_) | Self::NumericCoercionFailure(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrationError>;

/// A date string that could not be normalized to ISO 8601.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{value}'")]
pub struct InvalidDate {
    /// The offending source string, verbatim.
    pub value: String,
}

impl InvalidDate {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A value that was expected to be an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not an integer")]
pub struct NumericCoercionFailure {
    pub value: String,
}

impl NumericCoercionFailure {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A non-fatal, field-level problem found while transforming a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Zero-based position of the row in its source file.
    pub row: usize,
    pub field: String,
    pub value: String,
    pub kind: ErrorKind,
}

impl FieldIssue {
    pub fn invalid_date(row: usize, field: &str, error: InvalidDate) -> Self {
        Self {
            row,
            field: field.to_string(),
            value: error.value,
            kind: ErrorKind::InvalidDate,
        }
    }

    pub fn numeric(row: usize, field: &str, error: NumericCoercionFailure) -> Self {
        Self {
            row,
            field: field.to_string(),
            value: error.value,
            kind: ErrorKind::NumericCoercionFailure,
        }
    }

    /// One-based row number, as shown to users.
    pub fn line(&self) -> usize {
        self.row + 1
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}: {} '{}' ({})",
            self.line(),
            self.field,
            self.value,
            self.kind
        )
    }
}
