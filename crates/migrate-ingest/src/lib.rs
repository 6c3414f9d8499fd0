//! Reading legacy export tables.
//!
//! Locates legacy export tables and reads them into [`RawRecord`] rows.
//!
//! # Features
//!
//! - **Discovery**: resolve `tblX` to `tblX.json`, falling back to `tblX.csv`
//! - **JSON**: top-level arrays of flat row objects, key order preserved
//! - **CSV**: `;`-delimited exports with a header row
//! - **Encoding**: UTF-8 with or without BOM, Windows-1252 fallback
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use migrate_ingest::{ReadOptions, load_table};
//!
//! let table = load_table(Path::new("file/old"), "tblRepairList", &ReadOptions::default())?;
//! println!("{} rows from {}", table.len(), table.path.display());
//! ```
//!
//! [`RawRecord`]: migrate_model::RawRecord

mod decode;
mod delimited;
mod discovery;
mod error;
mod json;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{list_input_files, resolve_table};

// === Reading ===
pub use decode::decode_text;
pub use delimited::parse_delimited;
pub use json::parse_json_rows;
pub use reader::{LoadedTable, ReadOptions, load_table, read_table};
