//! Pretty JSON files.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{OutputError, Result};

/// Creates a directory and its parents.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| OutputError::Io {
        operation: "create directory",
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Renders a value as 2-space indented JSON with a trailing newline.
pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|e| OutputError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Writes a value as pretty JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = to_json_bytes(value, path)?;
    write_bytes_atomic(path, &bytes)
}

/// Writes bytes to a sibling temp file, then renames it over `path`.
///
/// The parent directory is created if needed. A failed write never leaves a
/// truncated target behind.
pub fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");

    let mut file = File::create(&temp_path).map_err(|e| OutputError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    file.write_all(bytes).map_err(|e| OutputError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;
    file.sync_all().map_err(|e| OutputError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        OutputError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_json_pretty_with_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tblMarca.json");
        write_json(&path, &serde_json::json!([{"Marca": "Bosch"}])).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[\n  {\n    \"Marca\": \"Bosch\"\n  }\n]\n");
        assert!(!dir.path().join("tblMarca.json.tmp").exists());
    }

    #[test]
    fn test_write_json_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("new").join("reference").join("tblTipos.json");
        write_json(&path, &Vec::<String>::new()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn test_ensure_dir_fails_under_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let err = ensure_dir(&blocker.join("out")).unwrap_err();
        assert!(matches!(err, OutputError::Io { .. }));
    }
}
