//! Text decoding for legacy export files.
//!
//! Exports are UTF-8 (optionally with a BOM) or, for older Access dumps,
//! Windows-1252. UTF-16 files are rejected.

use std::path::Path;

use encoding_rs::WINDOWS_1252;
use tracing::warn;

use crate::error::{IngestError, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Decodes file bytes to text.
pub fn decode_text(bytes: &[u8], path: &Path) -> Result<String> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }

    let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    warn!(
        path = %path.display(),
        replacements = had_errors,
        "input is not valid UTF-8, decoded as Windows-1252"
    );
    Ok(text.into_owned())
}
