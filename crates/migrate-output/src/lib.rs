//! Writing migrated datasets.
//!
//! Every output is a pretty-printed JSON file (2-space indent, trailing
//! newline) written through a temp file and a rename. [`OutputSet`] collects
//! the files of one dataset group and writes them independently, so a
//! failing file is reported without stopping the rest.

mod error;
mod json;
mod set;

// === Error Types ===
pub use error::{OutputError, Result};

// === Writing ===
pub use json::{ensure_dir, to_json_bytes, write_bytes_atomic, write_json};
pub use set::{OutputSet, WriteOutcome};
