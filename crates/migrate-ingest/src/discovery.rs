//! Input table discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Extensions tried for a table, in order of preference.
const TABLE_EXTENSIONS: [&str; 2] = ["json", "csv"];

/// Lists the `.json` and `.csv` files in a directory.
///
/// Returns files sorted by filename.
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_table = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                TABLE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if is_table {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Resolves a logical table (`tblCI`) to `tblCI.json`, else `tblCI.csv`.
pub fn resolve_table(dir: &Path, stem: &str) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    TABLE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| IngestError::InputNotFound {
            path: dir.join(stem),
        })
}
