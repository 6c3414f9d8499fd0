//! Field selection for open-schema tables.
//!
//! Tables like `tblCircuitoList` carry columns the migration does not know
//! in advance. A [`FieldSelection`] copies every column except a deny-list,
//! in source order, then appends derived date fields.

use migrate_model::{DateField, FieldIssue, RawRecord, SelectedRecord};

use crate::repair::{RecordTransformer, date_field};

/// A date column rewritten under a new name, e.g. `Data` to `DataTime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedDate {
    pub source: String,
    pub target: String,
}

/// Deny-list plus derived fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection {
    denied: Vec<String>,
    derived: Vec<DerivedDate>,
}

impl FieldSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop `column` from the output.
    pub fn deny(mut self, column: impl Into<String>) -> Self {
        self.denied.push(column.into());
        self
    }

    /// Drop `source` and append `target` holding its canonical timestamp.
    pub fn derive_date(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        self.denied.push(source.clone());
        self.derived.push(DerivedDate {
            source,
            target: target.into(),
        });
        self
    }

    /// Lookup tables: everything but `ID`.
    pub fn without_id() -> Self {
        Self::new().deny("ID")
    }

    /// `tblCircuitoList`: drop `ID`, move `Data` into `DataTime`.
    pub fn circuit_list() -> Self {
        Self::without_id().derive_date("Data", "DataTime")
    }

    pub fn is_denied(&self, column: &str) -> bool {
        self.denied.iter().any(|denied| denied == column)
    }
}

impl RecordTransformer for FieldSelection {
    type Output = SelectedRecord;

    fn transform(
        &self,
        row: usize,
        raw: &RawRecord,
        issues: &mut Vec<FieldIssue>,
    ) -> SelectedRecord {
        let mut record = SelectedRecord::new();
        for (column, value) in raw.iter() {
            if !self.is_denied(column) {
                record.set(column, Some(value.to_string()));
            }
        }

        for derived in &self.derived {
            match date_field(row, &derived.target, raw.field(&derived.source), issues) {
                DateField::Value(timestamp) => record.set(derived.target.as_str(), Some(timestamp)),
                DateField::NotApplicable => record.set(derived.target.as_str(), None),
                DateField::Invalid => {}
            }
        }

        record
    }
}
