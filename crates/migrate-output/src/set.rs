//! Batches of output files written independently.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info};

use crate::error::{OutputError, Result};
use crate::json::{to_json_bytes, write_bytes_atomic};

/// One file waiting to be written.
#[derive(Debug)]
struct PendingOutput {
    path: PathBuf,
    records: usize,
    payload: Result<Vec<u8>>,
}

/// The files a dataset group produces.
///
/// Values are serialized when pushed so the set does not borrow them.
/// A value that fails to serialize is reported by [`OutputSet::write_all`]
/// like any other write failure.
#[derive(Debug, Default)]
pub struct OutputSet {
    pending: Vec<PendingOutput>,
}

impl OutputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a sequence of records.
    pub fn push<T: Serialize>(&mut self, path: impl Into<PathBuf>, records: &[T]) {
        let path = path.into();
        let payload = to_json_bytes(records, &path);
        self.pending.push(PendingOutput {
            path,
            records: records.len(),
            payload,
        });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.pending.iter().map(|output| output.path.as_path())
    }

    /// Attempts every write; one failure does not stop the others.
    pub fn write_all(self) -> Vec<WriteOutcome> {
        self.pending
            .into_iter()
            .map(|output| {
                let result = output
                    .payload
                    .and_then(|bytes| write_bytes_atomic(&output.path, &bytes));
                match &result {
                    Ok(()) => info!(
                        path = %output.path.display(),
                        records = output.records,
                        "output written"
                    ),
                    Err(e) => error!(
                        path = %output.path.display(),
                        error = %e,
                        "output write failed"
                    ),
                }
                WriteOutcome {
                    path: output.path,
                    records: output.records,
                    result,
                }
            })
            .collect()
    }
}

/// Result of writing one output file.
#[derive(Debug)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub records: usize,
    pub result: Result<()>,
}

impl WriteOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&OutputError> {
        self.result.as_ref().err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_push_records_count() {
        let mut set = OutputSet::new();
        set.push("a.json", &["x", "y"]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.paths().next(), Some(Path::new("a.json")));
    }

    #[test]
    fn test_write_all_reports_each_file() {
        let dir = tempdir().unwrap();
        let mut set = OutputSet::new();
        set.push(dir.path().join("tblF.json"), &["a"]);
        set.push(dir.path().join("tblMarca.json"), &["b", "c"]);

        let outcomes = set.write_all();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(WriteOutcome::is_ok));
        assert_eq!(outcomes[1].records, 2);
        assert!(dir.path().join("tblMarca.json").exists());
    }
}
