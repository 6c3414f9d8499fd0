//! Table reading entry points.

use std::path::{Path, PathBuf};

use migrate_model::RawRecord;
use tracing::debug;

use crate::decode::decode_text;
use crate::delimited::parse_delimited;
use crate::discovery::resolve_table;
use crate::error::{IngestError, Result};
use crate::json::parse_json_rows;

/// Options for reading input tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field delimiter for `.csv` exports.
    pub csv_delimiter: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { csv_delimiter: b';' }
    }
}

/// Rows of one logical table and the file they came from.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub rows: Vec<RawRecord>,
}

impl LoadedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reads a `.json` or `.csv` table file into rows.
pub fn read_table(path: &Path, options: &ReadOptions) -> Result<Vec<RawRecord>> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let text = decode_text(&bytes, path)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let rows = match extension.as_deref() {
        Some("json") => parse_json_rows(&text, path)?,
        Some("csv") => parse_delimited(&text, options.csv_delimiter, path)?,
        _ => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    debug!(path = %path.display(), rows = rows.len(), "table read");
    Ok(rows)
}

/// Resolves a logical table in `dir` and reads it.
pub fn load_table(dir: &Path, stem: &str, options: &ReadOptions) -> Result<LoadedTable> {
    let path = resolve_table(dir, stem)?;
    let rows = read_table(&path, options)?;
    Ok(LoadedTable { path, rows })
}
